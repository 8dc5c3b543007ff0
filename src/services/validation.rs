// src/services/validation.rs
//
// Pipeline de validação dos pedidos. Roda em ordem e para no primeiro erro:
//   1. presença  2. números  3. formato do id  4. data  5. cliente existe

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ClientStore,
    models::{
        delivery::DeliveryPricing,
        order::{OrderDraft, OrderPatch, OrderPayload},
    },
};

/// Tamanho textual de um UUID ("xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx").
pub const IDENTIFIER_LENGTH: usize = 36;

// Maior valor que cabe em NUMERIC(10, 2)
fn max_numeric() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

const MAX_STATUS_LENGTH: usize = 20;

// Colunas VARCHAR da tabela orders
const MAX_DELIVERY_TYPE_LENGTH: usize = 50;

/// Id com tamanho diferente de 36 é entrada malformada, nunca "não encontrado".
pub fn parse_identifier(raw: &str, message: &str) -> Result<Uuid, AppError> {
    if raw.chars().count() != IDENTIFIER_LENGTH {
        return Err(AppError::malformed(message));
    }
    Uuid::parse_str(raw).map_err(|_| AppError::malformed(message))
}

fn parse_identifier_value(value: &Value, message: &str) -> Result<Uuid, AppError> {
    match value {
        Value::String(raw) => parse_identifier(raw, message),
        _ => Err(AppError::malformed(message)),
    }
}

/// Aceita número JSON ou string numérica. Negativo é inválido.
/// Guarda com 2 casas, igual à coluna do banco, para o preço ser reproduzível.
/// O arredondamento vale também nos limites: `50.004` kg vira `50.00` e não
/// paga a taxa de carga pesada, que só começa acima de 50.
pub fn parse_decimal(value: &Value, field: &str) -> Result<Decimal, AppError> {
    let invalid = || AppError::malformed(format!("Campos preenchidos com valores inválidos: {field}"));

    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(invalid()),
    };

    let number = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| invalid())?;

    let number = number.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if number.is_sign_negative() && !number.is_zero() {
        return Err(invalid());
    }
    if number > max_numeric() {
        return Err(invalid());
    }

    Ok(number.abs())
}

/// RFC 3339, data-hora sem fuso (assumida UTC) ou só a data.
pub fn parse_order_date(value: &Value) -> Result<DateTime<Utc>, AppError> {
    let invalid = || AppError::malformed("Data do pedido inválida");

    let Value::String(raw) = value else {
        return Err(invalid());
    };
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(invalid())
}

fn parse_delivery_type(value: &Value) -> Result<String, AppError> {
    match value {
        Value::String(s)
            if !s.trim().is_empty() && s.chars().count() <= MAX_DELIVERY_TYPE_LENGTH =>
        {
            Ok(s.clone())
        }
        _ => Err(AppError::malformed("Tipo de entrega inválido")),
    }
}

fn parse_status(value: &Value) -> Result<String, AppError> {
    match value {
        Value::String(s) if !s.trim().is_empty() && s.chars().count() <= MAX_STATUS_LENGTH => {
            Ok(s.clone())
        }
        _ => Err(AppError::malformed("Status da entrega inválido")),
    }
}

/// Passos 1 a 4 do cadastro: só olham o payload, não tocam no banco.
pub fn validate_new_order(payload: &OrderPayload) -> Result<OrderDraft, AppError> {
    // 1. Presença (zero é valor válido, null conta como ausente)
    let (
        Some(client_id),
        Some(order_date),
        Some(delivery_type),
        Some(distance_km),
        Some(weight_kg),
        Some(rate_per_km),
        Some(rate_per_kg),
    ) = (
        &payload.client_id,
        &payload.order_date,
        &payload.delivery_type,
        &payload.distance_km,
        &payload.weight_kg,
        &payload.rate_per_km,
        &payload.rate_per_kg,
    )
    else {
        return Err(AppError::malformed("Campos obrigatórios não foram preenchidos"));
    };

    // 2. Números
    let distance_km = parse_decimal(distance_km, "distanceKm")?;
    let weight_kg = parse_decimal(weight_kg, "weightKg")?;
    let rate_per_km = parse_decimal(rate_per_km, "ratePerKm")?;
    let rate_per_kg = parse_decimal(rate_per_kg, "ratePerKg")?;

    // 3. Formato do id do cliente
    let client_id = parse_identifier_value(client_id, "Id do Cliente inválido")?;

    // 4. Data
    let order_date = parse_order_date(order_date)?;

    let delivery_type = parse_delivery_type(delivery_type)?;

    Ok(OrderDraft {
        client_id,
        order_date,
        delivery_type,
        distance_km,
        weight_kg,
        rate_per_km,
        rate_per_kg,
    })
}

/// Atualização: cada campo enviado passa pela mesma regra do cadastro,
/// na mesma ordem (números, id, data).
pub fn validate_order_patch(payload: &OrderPayload) -> Result<OrderPatch, AppError> {
    let decimal = |value: &Option<Value>, field: &str| -> Result<Option<Decimal>, AppError> {
        value.as_ref().map(|v| parse_decimal(v, field)).transpose()
    };

    let distance_km = decimal(&payload.distance_km, "distanceKm")?;
    let weight_kg = decimal(&payload.weight_kg, "weightKg")?;
    let rate_per_km = decimal(&payload.rate_per_km, "ratePerKm")?;
    let rate_per_kg = decimal(&payload.rate_per_kg, "ratePerKg")?;

    let client_id = payload
        .client_id
        .as_ref()
        .map(|v| parse_identifier_value(v, "ID do cliente inválido!"))
        .transpose()?;

    let order_date = payload.order_date.as_ref().map(parse_order_date).transpose()?;
    let delivery_type = payload.delivery_type.as_ref().map(parse_delivery_type).transpose()?;
    let status = payload.status.as_ref().map(parse_status).transpose()?;

    Ok(OrderPatch {
        client_id,
        order_date,
        delivery_type,
        distance_km,
        weight_kg,
        rate_per_km,
        rate_per_kg,
        status,
    })
}

/// Depois do preço: cada valor calculado tem que caber em NUMERIC(10, 2).
/// Entradas válidas isoladamente podem estourar no produto (distância x tarifa).
pub fn ensure_price_fits(pricing: &DeliveryPricing) -> Result<(), AppError> {
    let fields = [
        pricing.distance_charge,
        pricing.weight_charge,
        pricing.surcharge,
        pricing.extra_fee,
        pricing.discount,
        pricing.final_price,
    ];
    if fields.iter().any(|value| *value > max_numeric()) {
        return Err(AppError::malformed(
            "Campos preenchidos com valores inválidos: valor do frete excede o limite",
        ));
    }
    Ok(())
}

/// 5. O cliente tem que existir. Zero registros = não encontrado.
pub async fn ensure_client_exists<S>(store: &S, client_id: Uuid) -> Result<(), AppError>
where
    S: ClientStore + ?Sized,
{
    match store.find_client(client_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::not_found("Cliente não encontrado")),
    }
}

/// Pipeline completo do cadastro de pedido.
pub async fn validate_order_creation<S>(store: &S, payload: &OrderPayload) -> Result<OrderDraft, AppError>
where
    S: ClientStore + ?Sized,
{
    let draft = validate_new_order(payload)?;
    ensure_client_exists(store, draft.client_id).await?;
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_store::InMemoryStore;
    use crate::models::client::ClientRecord;
    use serde_json::json;

    const CLIENT_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn full_payload() -> OrderPayload {
        serde_json::from_value(json!({
            "clientId": CLIENT_ID,
            "orderDate": "2025-03-10T14:00:00Z",
            "deliveryType": "urgente",
            "distanceKm": 100,
            "weightKg": "60",
            "ratePerKm": 3.0,
            "ratePerKg": 2
        }))
        .unwrap()
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::MalformedInput(m) | AppError::NotFound(m) => m,
            other => panic!("erro inesperado: {other:?}"),
        }
    }

    #[test]
    fn identifier_length_is_checked_before_content() {
        let cases = [
            String::new(),
            "abc".to_string(),
            "a".repeat(35),
            "a".repeat(37),
            format!("{CLIENT_ID}0"),
        ];
        for raw in &cases {
            assert!(matches!(
                parse_identifier(raw, "inválido"),
                Err(AppError::MalformedInput(_))
            ));
        }
        assert!(parse_identifier(CLIENT_ID, "inválido").is_ok());
    }

    #[test]
    fn thirty_six_chars_that_are_not_a_uuid_are_malformed() {
        let raw = "z".repeat(IDENTIFIER_LENGTH);
        assert!(matches!(
            parse_identifier(&raw, "inválido"),
            Err(AppError::MalformedInput(_))
        ));
    }

    #[test]
    fn decimals_accept_numbers_and_numeric_strings() {
        assert_eq!(parse_decimal(&json!(12.5), "x").unwrap(), Decimal::new(125, 1));
        assert_eq!(parse_decimal(&json!("7"), "x").unwrap(), Decimal::new(7, 0));
        assert_eq!(parse_decimal(&json!(0), "x").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal(&json!("-0"), "x").unwrap(), Decimal::ZERO);

        assert!(parse_decimal(&json!("abc"), "x").is_err());
        assert!(parse_decimal(&json!(""), "x").is_err());
        assert!(parse_decimal(&json!(true), "x").is_err());
        assert!(parse_decimal(&json!(-1), "x").is_err());
        assert!(parse_decimal(&json!(100_000_000), "x").is_err());
    }

    #[test]
    fn order_dates_in_common_formats() {
        assert!(parse_order_date(&json!("2025-03-10T14:00:00Z")).is_ok());
        assert!(parse_order_date(&json!("2025-03-10T14:00:00-03:00")).is_ok());
        assert!(parse_order_date(&json!("2025-03-10T14:00:00")).is_ok());
        assert!(parse_order_date(&json!("2025-03-10")).is_ok());

        assert!(parse_order_date(&json!("2025-02-30")).is_err());
        assert!(parse_order_date(&json!("ontem")).is_err());
        assert!(parse_order_date(&json!(20250310)).is_err());
    }

    #[test]
    fn full_payload_becomes_a_draft() {
        let draft = validate_new_order(&full_payload()).unwrap();
        assert_eq!(draft.client_id.to_string(), CLIENT_ID);
        assert_eq!(draft.weight_kg, Decimal::new(60, 0));
        assert_eq!(draft.rate_per_km, Decimal::new(3, 0));
        assert_eq!(draft.delivery_type, "urgente");
    }

    #[test]
    fn zero_is_present_but_null_is_missing() {
        let mut payload = full_payload();
        payload.weight_kg = Some(json!(0));
        assert!(validate_new_order(&payload).is_ok());

        let mut payload = full_payload();
        payload.weight_kg = None;
        assert_eq!(
            message(validate_new_order(&payload).unwrap_err()),
            "Campos obrigatórios não foram preenchidos"
        );
    }

    #[test]
    fn only_the_first_failure_is_reported() {
        // número inválido E id inválido E data inválida: ganha o número
        let mut payload = full_payload();
        payload.distance_km = Some(json!("muito"));
        payload.client_id = Some(json!("curto"));
        payload.order_date = Some(json!("nunca"));
        assert!(message(validate_new_order(&payload).unwrap_err()).contains("distanceKm"));

        // id inválido E data inválida: ganha o id
        let mut payload = full_payload();
        payload.client_id = Some(json!("curto"));
        payload.order_date = Some(json!("nunca"));
        assert_eq!(
            message(validate_new_order(&payload).unwrap_err()),
            "Id do Cliente inválido"
        );

        let mut payload = full_payload();
        payload.order_date = Some(json!("nunca"));
        assert_eq!(
            message(validate_new_order(&payload).unwrap_err()),
            "Data do pedido inválida"
        );
    }

    #[test]
    fn delivery_type_is_capped_at_column_length() {
        let mut payload = full_payload();
        payload.delivery_type = Some(json!("x".repeat(60)));
        assert_eq!(
            message(validate_new_order(&payload).unwrap_err()),
            "Tipo de entrega inválido"
        );

        payload.delivery_type = Some(json!("x".repeat(50)));
        assert!(validate_new_order(&payload).is_ok());

        let patch: OrderPayload =
            serde_json::from_value(json!({ "deliveryType": "y".repeat(51) })).unwrap();
        assert!(matches!(validate_order_patch(&patch), Err(AppError::MalformedInput(_))));
    }

    #[test]
    fn rounding_happens_before_the_heavy_cargo_boundary() {
        let weight = parse_decimal(&json!(50.004), "weightKg").unwrap();
        assert_eq!(weight, Decimal::new(50, 0));
    }

    #[test]
    fn price_that_overflows_the_column_is_malformed() {
        use crate::services::pricing::{calculate_delivery_price, PricingInput};

        let mut payload = full_payload();
        payload.distance_km = Some(json!(100000));
        payload.rate_per_km = Some(json!(1000));
        // Cada entrada cabe sozinha
        let draft = validate_new_order(&payload).unwrap();

        let pricing = calculate_delivery_price(PricingInput::from(&draft));
        assert!(matches!(ensure_price_fits(&pricing), Err(AppError::MalformedInput(_))));

        let ordinary = calculate_delivery_price(PricingInput::from(
            &validate_new_order(&full_payload()).unwrap(),
        ));
        assert!(ensure_price_fits(&ordinary).is_ok());
    }

    #[test]
    fn patch_keeps_absent_fields_unset() {
        let payload: OrderPayload = serde_json::from_value(json!({ "weightKg": 10 })).unwrap();
        let patch = validate_order_patch(&payload).unwrap();

        assert_eq!(patch.weight_kg, Some(Decimal::new(10, 0)));
        assert_eq!(
            patch,
            OrderPatch {
                weight_kg: Some(Decimal::new(10, 0)),
                ..Default::default()
            }
        );
    }

    #[test]
    fn patch_rejects_malformed_supplied_fields() {
        let bad_id: OrderPayload = serde_json::from_value(json!({ "clientId": "123" })).unwrap();
        assert!(matches!(validate_order_patch(&bad_id), Err(AppError::MalformedInput(_))));

        let bad_status: OrderPayload = serde_json::from_value(json!({ "status": "" })).unwrap();
        assert!(matches!(validate_order_patch(&bad_status), Err(AppError::MalformedInput(_))));
    }

    #[tokio::test]
    async fn unknown_client_is_not_found() {
        let store = InMemoryStore::new();
        let err = validate_order_creation(&store, &full_payload()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn existing_client_passes_the_pipeline() {
        let store = InMemoryStore::new();
        let client = store
            .insert_client(&ClientRecord {
                name: "Maria".into(),
                cpf: "12345678901".into(),
                phone: "11987654321".into(),
                email: "maria@exemplo.com".into(),
                address: "Rua A".into(),
            })
            .await
            .unwrap();

        let mut payload = full_payload();
        payload.client_id = Some(json!(client.id.to_string()));

        let draft = validate_order_creation(&store, &payload).await.unwrap();
        assert_eq!(draft.client_id, client.id);
    }
}
