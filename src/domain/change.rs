use super::coin::CoinMap;

/// Order in which denominations are paid out as change, largest first.
pub const CHANGE_ORDER: [u32; 4] = [10, 5, 2, 1];

/// Greedily allocates coins from `stock` until `target` is paid out.
///
/// Walks [`CHANGE_ORDER`] once, taking a denomination for as long as it still
/// fits in the remaining amount and `stock` holds more of it than `allocation`
/// has already claimed. Claimed coins are recorded in `allocation`.
///
/// Returns `true` when the remaining amount reaches zero. A `false` result is
/// final for this stock: the walk is deterministic, so retrying cannot find
/// another combination. `allocation` is left partially filled in that case and
/// the caller is responsible for clearing it.
pub fn allocate(stock: &CoinMap, target: u64, allocation: &mut CoinMap) -> bool {
    let mut remaining = target;
    for coin in CHANGE_ORDER {
        let value = u64::from(coin);
        while remaining >= value && stock.count(coin) > allocation.count(coin) {
            remaining -= value;
            allocation.set(coin, allocation.count(coin) + 1);
        }
        if remaining == 0 {
            break;
        }
    }
    remaining == 0
}
