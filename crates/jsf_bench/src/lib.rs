//! Generated documents for the filter benchmarks

use serde_json::{Value, json};

/// An order log with `count` records, each carrying a nested customer object
pub fn orders(count: usize) -> Value {
    let records: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": i,
                "status": if i % 3 == 0 { "shipped" } else { "pending" },
                "customer": {
                    "name": format!("customer-{i}"),
                    "email": format!("c{i}@example.com"),
                    "card": {"number": "4111111111111111", "expiry": "12/30"}
                },
                "items": [
                    {"sku": format!("sku-{}", i % 17), "qty": i % 5 + 1, "price": 9.99},
                    {"sku": format!("sku-{}", i % 23), "qty": 1, "price": 120.5}
                ],
                "notes": null
            })
        })
        .collect();
    json!({"version": 1, "orders": records})
}

/// An object nested `depth` levels deep under key `n`
pub fn deep(depth: usize) -> Value {
    let mut value = json!({"leaf": true});
    for _ in 0..depth {
        value = json!({"n": value, "pad": [1, 2, 3]});
    }
    value
}
