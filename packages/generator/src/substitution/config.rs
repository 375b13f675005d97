//! Rule set configuration for the bundled Colombian service contract.
//!
//! The template is a filled-in example contract. Its literal values (party
//! names, tax ids, amounts, dates) act as anchors; each rule below knows one
//! of them and what record field replaces it.

use std::sync::LazyLock;

use regex::Regex;

use super::core::RuleSet;
use super::rules::{LiteralRule, PlaceholderRule, SectionRule};
use super::types::RuleContext;
use crate::error::Result;
use crate::numbers::{to_currency_string, to_words};
use crate::types::PaymentItem;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CONTRATANTE_DOMICILIO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"domicilio principal en el municipio de La Estrella, Antioquia")
        .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CONTRATISTA_DOMICILIO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"con domicilio en el municipio de\s+Sabaneta").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CONTRATISTA_DIRECCION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"dirección: carera 40 # 71 sur-15").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static OBJETO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)prestará los servicios de:.*?Estos servicios").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static VALOR_TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)la suma de: SIETE MILLONES.*?\$ 7'040\.667").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DESGLOSE_PAGOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)discriminados de la siguiente manera:.*?El contratista podrá")
        .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FECHA_FIRMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Sabaneta, Antioquia a los siete \(14\) días del mes de enero")
        .expect("valid regex")
});

/// Create the rule set for the bundled contract template.
///
/// Order: named placeholders, literal anchors, the seven sections, then the
/// default contract parameters.
#[must_use]
pub fn create_contract_rules() -> RuleSet {
    let mut rules = RuleSet::new();

    rules.push(PlaceholderRule);

    // Contracting party
    rules.push(LiteralRule::new(
        "contratante_razon_social",
        "Dulces El Trapiche S.A.S",
        |ctx| Some(ctx.record.contratante_razon_social.clone()),
    ));
    // The closing clause spells the NIT with a stray space.
    rules.push(LiteralRule::new("contratante_nit", "890932227- 3", |ctx| {
        Some(ctx.record.contratante_nit.clone())
    }));
    rules.push(LiteralRule::new("contratante_nit", "890932227-3", |ctx| {
        Some(ctx.record.contratante_nit.clone())
    }));
    rules.push(LiteralRule::new(
        "contratante_representante",
        "Edison Ramírez Serna Quintero",
        |ctx| Some(ctx.record.contratante_representante.clone()),
    ));
    rules.push(LiteralRule::new(
        "contratante_direccion",
        "Cra 51 # 95A Sur -13",
        |ctx| Some(ctx.record.contratante_direccion.clone()),
    ));

    // Service provider
    rules.push(LiteralRule::new(
        "contratista_nombre",
        "GERMÁN GARCÍA PÉREZ",
        |ctx| Some(ctx.record.contratista_nombre.clone()),
    ));
    rules.push(LiteralRule::new("contratista_cc", "79155480", |ctx| {
        Some(ctx.record.contratista_cc.clone())
    }));
    rules.push(LiteralRule::new("contratista_cc", "79.155.480", |ctx| {
        Some(ctx.record.contratista_cc.clone())
    }));

    // Bank account
    rules.push(LiteralRule::new("banco", "Bancolombia", |ctx| {
        Some(ctx.record.banco.clone())
    }));
    rules.push(LiteralRule::new("tipo_cuenta", "cuenta de ahorros", |ctx| {
        let tipo = ctx.record.tipo_cuenta.trim();
        (!tipo.is_empty()).then(|| format!("cuenta de {tipo}"))
    }));
    rules.push(LiteralRule::new("numero_cuenta", "912-381559-89", |ctx| {
        Some(ctx.record.numero_cuenta.clone())
    }));
    rules.push(LiteralRule::new(
        "titular_cuenta",
        "Daniel García Araque",
        |ctx| Some(ctx.record.titular_cuenta.clone()),
    ));
    rules.push(LiteralRule::new("cc_titular", "1000718485", |ctx| {
        Some(ctx.record.cc_titular.clone())
    }));

    // Sections
    rules.push(SectionRule::new(
        "contratante_domicilio",
        &CONTRATANTE_DOMICILIO,
        |ctx| {
            Ok(Some(format!(
                "domicilio principal en el municipio de {}",
                ctx.record.contratante_domicilio
            )))
        },
    ));
    rules.push(SectionRule::new(
        "contratista_domicilio",
        &CONTRATISTA_DOMICILIO,
        |ctx| {
            Ok(Some(format!(
                "con domicilio en el municipio de {}",
                ctx.record.contratista_domicilio
            )))
        },
    ));
    rules.push(SectionRule::new(
        "contratista_direccion",
        &CONTRATISTA_DIRECCION,
        |ctx| Ok(Some(format!("dirección: {}", ctx.record.contratista_direccion))),
    ));
    rules.push(SectionRule::new("objeto_servicios", &OBJETO, |ctx| {
        Ok(Some(format!(
            "prestará los servicios de: {}\nEstos servicios",
            ctx.record.objeto_servicios
        )))
    }));
    rules.push(SectionRule::new("valor_total", &VALOR_TOTAL, total_fee));
    rules.push(SectionRule::new("pagos", &DESGLOSE_PAGOS, |ctx| {
        if ctx.record.pagos.is_empty() {
            return Ok(None);
        }
        Ok(Some(format!(
            "discriminados de la siguiente manera:\n{}El contratista podrá",
            payment_breakdown(&ctx.record.pagos)?
        )))
    }));
    rules.push(SectionRule::new("fecha_firma", &FECHA_FIRMA, |ctx| {
        Ok(Some(format!(
            "{} a los {}",
            ctx.record.lugar_firma,
            ctx.record.signing_date(ctx.defaults)
        )))
    }));

    // Contract parameters
    rules.push(LiteralRule::constant("retencion_minima", "$ 1'344.573", |ctx| {
        Some(format!("$ {}", ctx.record.withholding_threshold(ctx.defaults)))
    }));
    rules.push(LiteralRule::constant("penalidad_porcentaje", "20%", |ctx| {
        Some(format!("{}%", ctx.record.penalty_percentage(ctx.defaults)))
    }));
    rules.push(LiteralRule::constant("dias_gracia", "(5) días", |ctx| {
        Some(format!("({}) días", ctx.record.grace_days(ctx.defaults)))
    }));

    rules
}

/// Total fee in words and figures; precomputed words win.
fn total_fee(ctx: &RuleContext<'_>) -> Result<Option<String>> {
    let record = ctx.record;
    let words = match record.valor_total_letras.trim() {
        "" => to_words(record.valor_total)?,
        given => given.to_string(),
    };
    Ok(Some(format!(
        "la suma de: {words}, {}",
        to_currency_string(record.valor_total)?
    )))
}

/// Render the payment schedule, one bullet line per item.
///
/// Every line ends with a newline.
///
/// # Errors
/// Propagates number formatting errors for negative or oversized amounts.
///
/// # Examples
/// ```
/// use contrato_generator::substitution::payment_breakdown;
/// use contrato_generator::types::PaymentItem;
///
/// let lines = payment_breakdown(&[PaymentItem::new("Diseño", 500_000, "2 de mayo", 0)]).unwrap();
/// assert_eq!(
///     lines,
///     "• Diseño pagaderos: QUINIENTOS MIL PESOS M/Cte $ 500.000 el día 2 de mayo \
///      y CERO PESOS M/Cte $ 0 al momento de la entrega.\n"
/// );
/// ```
pub fn payment_breakdown(pagos: &[PaymentItem]) -> Result<String> {
    let mut out = String::new();
    for pago in pagos {
        out.push_str(&format!(
            "• {} pagaderos: {} {} el día {} y {} {} al momento de la entrega.\n",
            pago.concepto,
            to_words(pago.anticipo)?,
            to_currency_string(pago.anticipo)?,
            pago.fecha_anticipo,
            to_words(pago.saldo)?,
            to_currency_string(pago.saldo)?,
        ));
    }
    Ok(out)
}
