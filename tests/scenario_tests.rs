use coin_vending::config::MachineConfig;
use coin_vending::domain::coin::{ACCEPTED_COINS, CoinMap};
use coin_vending::domain::machine::{MachineState, VendingMachine};
use coin_vending::error::VendingError;

mod common;

#[test]
fn test_accepts_every_denomination() {
    let mut machine = VendingMachine::new();
    for coin in ACCEPTED_COINS {
        assert_eq!(machine.insert_coin(coin).unwrap(), "Done");
        assert_eq!(machine.user_balance().count(coin), 1);
    }
    assert_eq!(machine.balance_total(), 18);
}

#[test]
fn test_rejects_other_denominations() {
    let mut machine = VendingMachine::new();
    for coin in [3, 7, 11, 20] {
        assert!(matches!(
            machine.insert_coin(coin),
            Err(VendingError::InvalidCoin(_))
        ));
    }
    assert_eq!(machine.user_balance(), &CoinMap::zeroed());
}

#[test]
fn test_select_products() {
    let mut machine = VendingMachine::new();
    for product in ["water", "coca", "twix", "bueno"] {
        assert_eq!(machine.select_product(product).unwrap(), "Done");
    }
    for product in ["tacos", "cola", "phone"] {
        assert!(matches!(
            machine.select_product(product),
            Err(VendingError::ProductUnavailable(_))
        ));
    }
}

#[test]
fn test_buy_water_with_ten() {
    let mut machine = common::machine_ready(&[10], "water");

    let message = machine.submit().unwrap();
    assert_eq!(message, "You bought a water\nThe remaining change: 3");
    assert_eq!(machine.coin_stock().to_string(), "{1=4, 2=1, 5=0, 10=1}");
    assert!(!machine.catalog().contains("water"));
    assert_eq!(machine.state(), MachineState::Idle);
}

#[test]
fn test_buy_twix_with_ten_falls_back_to_small_coins() {
    let mut machine = common::machine_ready(&[10], "twix");

    let message = machine.submit().unwrap();
    assert_eq!(message, "You bought a twix\nThe remaining change: 5");
    assert_eq!(machine.coin_stock().to_string(), "{1=4, 2=0, 5=0, 10=1}");
}

#[test]
fn test_buy_with_exact_and_small_change() {
    let cases = [
        ("coca", 10, "You bought a coca\nThe remaining change: 2"),
        ("twix", 5, "You bought a twix\nThe remaining change: 0"),
    ];
    for (product, coin, expected) in cases {
        let mut machine = common::machine_ready(&[coin], product);
        assert_eq!(machine.submit().unwrap(), expected);
    }
}

#[test]
fn test_no_coins_for_change() {
    let cases = [("water", 5), ("bueno", 10), ("twix", 2)];
    for (product, coin) in cases {
        let mut machine = common::machine_ready(&[coin], product);
        let stock_before = machine.coin_stock().clone();

        let err = machine.submit().unwrap_err();
        assert!(matches!(err, VendingError::InsufficientChangeAvailable));
        assert_eq!(err.to_string(), "There is no coins for change");
        assert_eq!(machine.coin_stock(), &stock_before);
        assert_eq!(machine.balance_total(), u64::from(coin));
        assert_eq!(machine.selected_product(), Some(product));
    }
}

#[test]
fn test_submit_distinguishes_empty_and_paid_without_selection() {
    let mut machine = VendingMachine::new();
    assert!(matches!(machine.submit(), Err(VendingError::NothingSelected)));

    machine.insert_coin(5).unwrap();
    machine.insert_coin(2).unwrap();
    let stock_before = machine.coin_stock().clone();

    let err = machine.submit().unwrap_err();
    assert!(matches!(err, VendingError::InsufficientChangeAvailable));
    assert_eq!(machine.balance_total(), 7);
    assert_eq!(machine.coin_stock(), &stock_before);
    assert_eq!(machine.state(), MachineState::CoinsInserted);

    machine.select_product("water").unwrap();
    assert_eq!(
        machine.submit().unwrap(),
        "You bought a water\nThe remaining change: 0"
    );
}

#[test]
fn test_underpayment_can_be_topped_up() {
    let mut machine = common::machine_ready(&[5], "water");
    assert!(machine.submit().is_err());

    machine.insert_coin(2).unwrap();
    assert_eq!(
        machine.submit().unwrap(),
        "You bought a water\nThe remaining change: 0"
    );
}

#[test]
fn test_cancel_returns_inserted_coins() {
    let mut machine = VendingMachine::new();
    machine.insert_coin(10).unwrap();
    machine.insert_coin(5).unwrap();
    machine.select_product("water").unwrap();

    let returned = machine.cancel();
    let expected: CoinMap = [(5, 1), (10, 1)].into_iter().collect();
    assert_eq!(returned, expected);
    assert_eq!(returned.to_string(), "{1=0, 2=0, 5=1, 10=1}");
    assert_eq!(machine.user_balance(), &CoinMap::zeroed());
    assert_eq!(machine.selected_product(), None);
}

#[test]
fn test_cancel_is_idempotent() {
    let mut machine = VendingMachine::new();
    machine.select_product("coca").unwrap();

    assert_eq!(machine.cancel(), CoinMap::zeroed());
    let after_first = machine.snapshot();
    assert_eq!(machine.cancel(), CoinMap::zeroed());
    assert_eq!(machine.snapshot(), after_first);
    assert_eq!(machine.selected_product(), None);
}

#[test]
fn test_depleted_small_coins_block_change() {
    let config = MachineConfig::empty()
        .with_product("water", 7)
        .with_product("tacos", 7)
        .with_coins(1, 1)
        .with_coins(2, 1)
        .with_coins(5, 1);
    let mut machine = VendingMachine::with_config(config);

    // The first sale pays out the only 2 and the only 1.
    machine.insert_coin(10).unwrap();
    machine.select_product("water").unwrap();
    machine.submit().unwrap();
    assert_eq!(machine.coin_stock().to_string(), "{1=0, 2=0, 5=1, 10=1}");

    machine.insert_coin(10).unwrap();
    machine.select_product("tacos").unwrap();
    assert!(matches!(
        machine.submit(),
        Err(VendingError::InsufficientChangeAvailable)
    ));
    assert_eq!(machine.coin_stock().to_string(), "{1=0, 2=0, 5=1, 10=1}");
    assert_eq!(machine.state(), MachineState::CoinsInsertedAndProductSelected);
}

#[test]
fn test_reset_after_purchases() {
    let mut machine = VendingMachine::new();
    machine.insert_coin(10).unwrap();
    machine.select_product("water").unwrap();
    machine.submit().unwrap();

    machine.insert_coin(10).unwrap();
    machine.select_product("coca").unwrap();
    machine.submit().unwrap();

    machine.reset();

    let expected = "VendingMachine{ACCEPTED_COINS=[1, 2, 5, 10], \
                    coinsStock={1=5, 2=2, 5=0, 10=0}, \
                    products={bueno=20, coca=8, twix=5, water=7}, \
                    userBalance={1=0, 2=0, 5=0, 10=0}, \
                    selectedProduct='', \
                    changeCombination={1=0, 2=0, 5=0, 10=0}}";
    assert_eq!(machine.to_string(), expected);
}
