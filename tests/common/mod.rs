#![allow(dead_code)]

use coin_vending::domain::machine::VendingMachine;
use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Machine in its startup configuration with `coins` already inserted and
/// `product` selected.
pub fn machine_ready(coins: &[u32], product: &str) -> VendingMachine {
    let mut machine = VendingMachine::new();
    for &coin in coins {
        machine.insert_coin(coin).expect("accepted coin");
    }
    machine.select_product(product).expect("product in catalog");
    machine
}

/// Writes a session CSV that buys each of `products`, paying with a single 10.
pub fn generate_session_csv(path: &Path, products: &[&str]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(file);

    wtr.write_record(["action", "denomination", "product", "amount"])?;

    for &product in products {
        wtr.write_record(["insert", "10", "", ""])?;
        wtr.write_record(["select", "", product, ""])?;
        wtr.write_record(["submit"])?;
    }

    wtr.flush()?;
    Ok(())
}
