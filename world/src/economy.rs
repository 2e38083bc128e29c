//! Coin balance used to buy towers.

/// Player coin balance.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CoinLedger {
    balance: u32,
}

impl CoinLedger {
    pub(crate) const fn new(balance: u32) -> Self {
        Self { balance }
    }

    pub(crate) const fn balance(&self) -> u32 {
        self.balance
    }

    /// Deducts `amount` when the balance covers it. Returns `false` and leaves
    /// the balance untouched otherwise.
    pub(crate) fn spend(&mut self, amount: u32) -> bool {
        match self.balance.checked_sub(amount) {
            Some(remaining) => {
                self.balance = remaining;
                true
            }
            None => false,
        }
    }

    pub(crate) fn add(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
    }
}
