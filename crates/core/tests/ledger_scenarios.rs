//! Voucher balance scenarios

use proptest::prelude::*;
use tally::{
    ledger::{ConsumptionPolicy, CreditTally, voucher_balances},
    records::{Appointment, AppointmentStatus, CustomerId, Product, ProductKind, Purchase},
};

fn voucher(id: &str, count: u32) -> Product {
    Product {
        id: id.into(),
        name: "Hydrating Facial".to_string(),
        price: 450_000_u64.into(),
        kind: ProductKind::Voucher,
        count: Some(count),
        ..Product::default()
    }
}

fn purchase(id: &str, product: &str, quantity: u64) -> Purchase {
    Purchase {
        id: id.into(),
        customer_id: "cust-1".into(),
        product_id: product.into(),
        quantity,
        purchase_date: "2024-01-05T10:00:00Z".to_string(),
        ..Purchase::default()
    }
}

fn appointments(product: &str, n: usize) -> Vec<Appointment> {
    (0..n)
        .map(|i| Appointment {
            id: format!("appt-{i}").into(),
            customer_id: "cust-1".into(),
            product_id: product.into(),
            datetime: format!("2024-02-{:02}T11:00:00Z", i % 28 + 1),
            ..Appointment::default()
        })
        .collect()
}

fn customer() -> CustomerId {
    "cust-1".into()
}

#[test]
fn two_vouchers_of_ten_with_three_visits_leave_seventeen() {
    let balances = voucher_balances(
        &customer(),
        &[purchase("pur-1", "prod-1", 2)],
        &appointments("prod-1", 3),
        &[voucher("prod-1", 10)],
        ConsumptionPolicy::default(),
    );

    assert_eq!(balances.len(), 1, "one product with credits left");

    let balance = balances.first();

    assert_eq!(balance.map(|b| b.total_purchased_units), Some(2));
    assert_eq!(balance.map(|b| b.total_credits_purchased), Some(20));
    assert_eq!(balance.map(|b| b.total_credits_consumed), Some(3));
    assert_eq!(balance.map(|b| b.remaining_credits), Some(17));
}

#[test]
fn fully_used_vouchers_drop_off_the_list() {
    let balances = voucher_balances(
        &customer(),
        &[purchase("pur-1", "prod-1", 2)],
        &appointments("prod-1", 20),
        &[voucher("prod-1", 10)],
        ConsumptionPolicy::default(),
    );

    assert!(balances.is_empty(), "a zero balance is not shown");
}

#[test]
fn purchases_of_deleted_products_are_skipped() {
    let balances = voucher_balances(
        &customer(),
        &[purchase("pur-1", "gone", 3), purchase("pur-2", "prod-1", 1)],
        &appointments("gone", 1),
        &[voucher("prod-1", 10)],
        ConsumptionPolicy::default(),
    );

    let ids: Vec<&str> = balances.iter().map(|b| b.product_id.as_str()).collect();

    assert_eq!(ids, ["prod-1"]);
}

#[test]
fn separate_purchases_accumulate() {
    let balances = voucher_balances(
        &customer(),
        &[purchase("pur-1", "prod-1", 1), purchase("pur-2", "prod-1", 1)],
        &appointments("prod-1", 12),
        &[voucher("prod-1", 10)],
        ConsumptionPolicy::default(),
    );

    assert_eq!(balances.first().map(|b| b.remaining_credits), Some(8));
}

#[test]
fn entries_follow_first_purchase_order() {
    let balances = voucher_balances(
        &customer(),
        &[
            purchase("pur-1", "prod-b", 1),
            purchase("pur-2", "prod-a", 1),
            purchase("pur-3", "prod-b", 1),
        ],
        &[],
        &[voucher("prod-a", 5), voucher("prod-b", 5)],
        ConsumptionPolicy::default(),
    );

    let ids: Vec<&str> = balances.iter().map(|b| b.product_id.as_str()).collect();

    assert_eq!(ids, ["prod-b", "prod-a"]);
}

#[test]
fn cancelled_visits_only_count_under_the_default_policy() {
    let mut visits = appointments("prod-1", 4);
    for visit in visits.iter_mut().take(2) {
        visit.status = Some(AppointmentStatus::Cancelled);
    }

    let remaining = |policy| {
        voucher_balances(
            &customer(),
            &[purchase("pur-1", "prod-1", 1)],
            &visits,
            &[voucher("prod-1", 10)],
            policy,
        )
        .first()
        .map(|b| b.remaining_credits)
    };

    assert_eq!(remaining(ConsumptionPolicy::EveryAppointment), Some(6));
    assert_eq!(remaining(ConsumptionPolicy::ExcludeCancelled), Some(8));
}

proptest! {
    #[test]
    fn remaining_is_purchased_credits_minus_visits(
        quantities in prop::collection::vec(0u64..20, 0..6),
        unit_credits in 1u32..30,
        visits in 0usize..200,
    ) {
        let purchases: Vec<Purchase> = quantities
            .iter()
            .enumerate()
            .map(|(i, quantity)| purchase(&format!("pur-{i}"), "prod-1", *quantity))
            .collect();

        let balances = voucher_balances(
            &customer(),
            &purchases,
            &appointments("prod-1", visits),
            &[voucher("prod-1", unit_credits)],
            ConsumptionPolicy::default(),
        );

        let purchased = quantities.iter().sum::<u64>() * u64::from(unit_credits);
        let consumed = visits as u64;

        if purchased > consumed {
            prop_assert_eq!(balances.len(), 1);
            prop_assert_eq!(balances.first().map(|b| b.remaining_credits), Some(purchased - consumed));
        } else {
            prop_assert!(balances.is_empty());
        }
    }

    #[test]
    fn tally_counts_every_event(
        quantities in prop::collection::vec(1u64..10, 0..10),
        visits in 0usize..50,
    ) {
        let purchases: Vec<Purchase> = quantities
            .iter()
            .enumerate()
            .map(|(i, quantity)| purchase(&format!("pur-{i}"), "prod-1", *quantity))
            .collect();

        let tally = CreditTally::from_events(
            &purchases,
            &appointments("prod-1", visits),
            ConsumptionPolicy::EveryAppointment,
        );

        prop_assert_eq!(tally.purchased_units(&"prod-1".into()), quantities.iter().sum::<u64>());
        prop_assert_eq!(tally.consumed_credits(&"prod-1".into()), visits as u64);
    }
}
