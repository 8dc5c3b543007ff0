// src/services/pricing.rs
//
// Motor de preço da entrega. Função pura: mesma entrada, mesma saída.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{delivery::DeliveryPricing, order::OrderDraft};

// 20% sobre o valor base em entregas urgentes
fn urgent_surcharge_rate() -> Decimal {
    Decimal::new(20, 2)
}

// Taxa fixa para carga acima de 50 kg
fn heavy_cargo_threshold_kg() -> Decimal {
    Decimal::new(50, 0)
}

fn heavy_cargo_fee() -> Decimal {
    Decimal::new(1500, 2)
}

// 10% de desconto quando o total passa de 500
fn discount_threshold() -> Decimal {
    Decimal::new(500, 0)
}

fn discount_rate() -> Decimal {
    Decimal::new(10, 2)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingInput<'a> {
    pub distance_km: Decimal,
    pub weight_kg: Decimal,
    pub rate_per_km: Decimal,
    pub rate_per_kg: Decimal,
    pub delivery_type: &'a str,
}

impl<'a> From<&'a OrderDraft> for PricingInput<'a> {
    fn from(draft: &'a OrderDraft) -> Self {
        Self {
            distance_km: draft.distance_km,
            weight_kg: draft.weight_kg,
            rate_per_km: draft.rate_per_km,
            rate_per_kg: draft.rate_per_kg,
            delivery_type: &draft.delivery_type,
        }
    }
}

/// "urgente" (ou "urgent"), sem diferenciar maiúsculas.
pub fn is_urgent(delivery_type: &str) -> bool {
    delivery_type.eq_ignore_ascii_case("urgente") || delivery_type.eq_ignore_ascii_case("urgent")
}

fn money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Calcula o preço da entrega. A ordem das regras importa:
/// acréscimo e taxa entram antes, e o desconto olha o total já com eles.
pub fn calculate_delivery_price(input: PricingInput<'_>) -> DeliveryPricing {
    let distance_charge = input.distance_km * input.rate_per_km;
    let weight_charge = input.weight_kg * input.rate_per_kg;
    let base_total = distance_charge + weight_charge;

    let surcharge = if is_urgent(input.delivery_type) {
        base_total * urgent_surcharge_rate()
    } else {
        Decimal::ZERO
    };
    let mut running_total = base_total + surcharge;

    let extra_fee = if input.weight_kg > heavy_cargo_threshold_kg() {
        heavy_cargo_fee()
    } else {
        Decimal::ZERO
    };
    running_total += extra_fee;

    let discount = if running_total > discount_threshold() {
        running_total * discount_rate()
    } else {
        Decimal::ZERO
    };
    let final_price = running_total - discount;

    DeliveryPricing {
        distance_charge: money(distance_charge),
        weight_charge: money(weight_charge),
        surcharge: money(surcharge),
        extra_fee: money(extra_fee),
        discount: money(discount),
        final_price: money(final_price),
    }
}
