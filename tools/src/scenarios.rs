use goose::prelude::*;

use crate::{
    config::LoadtestConfig,
    transactions::{
        add_order, add_to_cart, cancel_order, get_cart, get_orders,
        get_products, login, logout, register, remove_from_cart,
        search_product,
    },
};

/// Walks the whole shop in a fixed order, then starts over with a new
/// account.
pub fn sequential_shopper(
    config: &LoadtestConfig,
) -> Result<Scenario, GooseError> {
    let (min, max) = config.wait_range();
    let steps = [
        transaction!(register).set_name("register"),
        transaction!(login).set_name("login"),
        transaction!(get_products).set_name("get products"),
        transaction!(get_cart).set_name("get cart"),
        transaction!(add_to_cart).set_name("add to cart"),
        transaction!(remove_from_cart).set_name("remove from cart"),
        transaction!(get_orders).set_name("get orders"),
        transaction!(add_order).set_name("add order"),
        transaction!(cancel_order).set_name("cancel order"),
        transaction!(logout).set_name("logout"),
    ];
    let mut scenario =
        scenario!("SequentialShopper").set_wait_time(min, max)?;
    for (i, step) in steps.into_iter().enumerate() {
        scenario = scenario.register_transaction(step.set_sequence(i + 1));
    }
    Ok(scenario)
}

/// Signs in once, browses with weighted odds, signs out when stopped.
pub fn weighted_browser(
    config: &LoadtestConfig,
) -> Result<Scenario, GooseError> {
    let (min, max) = config.wait_range();
    Ok(scenario!("WeightedBrowser")
        .set_wait_time(min, max)?
        .register_transaction(
            transaction!(register)
                .set_name("register")
                .set_on_start()
                .set_sequence(1),
        )
        .register_transaction(
            transaction!(login)
                .set_name("login")
                .set_on_start()
                .set_sequence(2),
        )
        .register_transaction(
            transaction!(get_products)
                .set_name("browse products")
                .set_weight(4)?,
        )
        .register_transaction(
            transaction!(search_product)
                .set_name("search product")
                .set_weight(3)?,
        )
        .register_transaction(
            transaction!(get_cart).set_name("view cart").set_weight(2)?,
        )
        .register_transaction(
            transaction!(add_to_cart).set_name("add to cart").set_weight(3)?,
        )
        .register_transaction(
            transaction!(remove_from_cart).set_name("remove from cart"),
        )
        .register_transaction(
            transaction!(get_orders).set_name("view orders").set_weight(2)?,
        )
        .register_transaction(transaction!(add_order).set_name("add order"))
        .register_transaction(
            transaction!(cancel_order).set_name("cancel order"),
        )
        .register_transaction(
            transaction!(logout).set_name("logout").set_on_stop(),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_order_is_fixed() {
        let scenario =
            sequential_shopper(&LoadtestConfig::default()).unwrap();
        let names: Vec<&str> = scenario
            .transactions
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "register",
                "login",
                "get products",
                "get cart",
                "add to cart",
                "remove from cart",
                "get orders",
                "add order",
                "cancel order",
                "logout",
            ]
        );
        assert!(
            scenario
                .transactions
                .windows(2)
                .all(|w| w[0].sequence < w[1].sequence)
        );
    }

    #[test]
    fn weighted_browser_signs_in_on_start() {
        let scenario = weighted_browser(&LoadtestConfig::default()).unwrap();
        let on_start: Vec<&str> = scenario
            .transactions
            .iter()
            .filter(|t| t.on_start)
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(on_start, ["register", "login"]);
        assert!(
            scenario
                .transactions
                .iter()
                .any(|t| t.on_stop && t.name == "logout")
        );
    }
}
