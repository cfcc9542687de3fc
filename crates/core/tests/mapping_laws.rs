//! Field mapper laws

use proptest::prelude::*;
use serde_json::{Value, json};
use tally::{
    entities::Collection,
    mapping::{to_client, to_storage},
};

fn optional_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-z0-9-]{1,12}")
}

prop_compose! {
    fn client_customer()(
        id in "[a-z0-9-]{1,12}",
        name in "[A-Za-z ]{0,20}",
        phone in "[0-9-]{0,13}",
        birth_date in "[0-9-]{0,10}",
        skin_type in prop::option::of(prop::sample::select(vec!["dry", "oily", "combination", "sensitive", "normal"])),
        memo in ".{0,30}",
        point in any::<i32>(),
        created_at in optional_text(),
        purchased in prop::collection::vec("[a-z0-9-]{1,8}", 0..4),
    ) -> Value {
        let mut record = json!({
            "id": id,
            "name": name,
            "phone": phone,
            "birthDate": birth_date,
            "memo": memo,
            "point": point,
            "purchasedProducts": purchased,
        });

        if let Some(object) = record.as_object_mut() {
            if let Some(skin_type) = skin_type {
                object.insert("skinType".to_string(), json!(skin_type));
            }
            if let Some(created_at) = created_at {
                object.insert("createdAt".to_string(), json!(created_at));
            }
        }

        record
    }
}

prop_compose! {
    fn client_purchase()(
        id in "[a-z0-9-]{1,12}",
        customer in "[a-z0-9-]{1,12}",
        product in "[a-z0-9-]{1,12}",
        quantity in 0u64..1000,
        date in "[0-9T:-]{0,20}",
        total_price in prop::option::of(0u64..10_000_000),
        user_id in optional_text(),
    ) -> Value {
        let mut record = json!({
            "id": id,
            "customerId": customer,
            "productId": product,
            "quantity": quantity,
            "purchaseDate": date,
        });

        if let Some(object) = record.as_object_mut() {
            if let Some(total_price) = total_price {
                object.insert("totalPrice".to_string(), json!(total_price));
            }
            if let Some(user_id) = user_id {
                object.insert("userId".to_string(), json!(user_id));
            }
        }

        record
    }
}

proptest! {
    #[test]
    fn customer_round_trip_is_exact(customer in client_customer()) {
        let row = to_storage(Collection::Customers, customer.clone())?;
        let back = to_client(Collection::Customers, Value::Object(row))?;

        prop_assert_eq!(Value::Object(back), customer);
    }

    #[test]
    fn purchase_round_trip_is_exact(purchase in client_purchase()) {
        let row = to_storage(Collection::Purchases, purchase.clone())?;
        let back = to_client(Collection::Purchases, Value::Object(row))?;

        prop_assert_eq!(Value::Object(back), purchase);
    }

    #[test]
    fn storage_mapping_is_idempotent(customer in client_customer()) {
        let once = to_storage(Collection::Customers, customer)?;
        let twice = to_storage(Collection::Customers, Value::Object(once.clone()))?;

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn client_mapping_is_idempotent(purchase in client_purchase()) {
        let once = to_client(Collection::Purchases, purchase)?;
        let twice = to_client(Collection::Purchases, Value::Object(once.clone()))?;

        prop_assert_eq!(once, twice);
    }
}

#[test]
fn storage_rows_are_read_back_into_client_shape() -> Result<(), Box<dyn std::error::Error>> {
    let row = json!({
        "id": "appt-1",
        "customer_id": "cust-1",
        "product_id": "prod-1",
        "datetime": "2024-02-01T11:00:00Z",
        "memo": null,
        "status": "completed",
        "created_at": "2024-01-30T09:00:00Z",
    });

    let client = to_client(Collection::Appointments, row)?;

    assert_eq!(client.get("customerId"), Some(&json!("cust-1")));
    assert_eq!(client.get("memo"), Some(&json!("")));
    assert!(!client.contains_key("created_at"), "timestamps are storage-only for appointments");

    Ok(())
}
