use crate::domain::coin::CoinMap;
use crate::domain::machine::{MachineSnapshot, MachineState, VendingMachine};
use crate::domain::session::{Action, Outcome, SessionEvent};
use crate::error::{Result, VendingError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

/// Shared front for one physical machine.
///
/// Clones hand out the same machine. Each call holds the lock for exactly one
/// operation, so terminals observe a single serialized stream of operations.
#[derive(Clone)]
pub struct VendingTerminal {
    machine: Arc<Mutex<VendingMachine>>,
}

/// Result of replaying a recorded session.
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub outcomes: Vec<Outcome>,
    pub failures: Vec<VendingError>,
}

impl ReplayReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Confirmations of every purchase completed during the replay.
    pub fn purchases(&self) -> impl Iterator<Item = &str> + '_ {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            Outcome::Purchased(message) => Some(message.as_str()),
            _ => None,
        })
    }
}

impl VendingTerminal {
    pub fn new(machine: VendingMachine) -> Self {
        Self {
            machine: Arc::new(Mutex::new(machine)),
        }
    }

    pub async fn restock(&self, denomination: u32, count: u32) -> Result<()> {
        self.machine.lock().await.restock(denomination, count)
    }

    pub async fn add_product(&self, name: impl Into<String>, price: u32) {
        self.machine.lock().await.add_product(name, price);
    }

    pub async fn insert_coin(&self, denomination: u32) -> Result<&'static str> {
        self.machine.lock().await.insert_coin(denomination)
    }

    pub async fn select_product(&self, name: &str) -> Result<&'static str> {
        self.machine.lock().await.select_product(name)
    }

    pub async fn cancel(&self) -> CoinMap {
        self.machine.lock().await.cancel()
    }

    pub async fn submit(&self) -> Result<String> {
        self.machine.lock().await.submit()
    }

    pub async fn reset(&self) {
        self.machine.lock().await.reset();
    }

    pub async fn state(&self) -> MachineState {
        self.machine.lock().await.state()
    }

    pub async fn snapshot(&self) -> MachineSnapshot {
        self.machine.lock().await.snapshot()
    }

    /// Applies one recorded operation under a single lock acquisition.
    pub async fn apply(&self, event: SessionEvent) -> Result<Outcome> {
        let mut machine = self.machine.lock().await;
        let outcome = match event.action {
            Action::Restock => {
                machine.restock(event.require_denomination()?, event.require_amount()?)?;
                Outcome::Restocked
            }
            Action::AddProduct => {
                machine.add_product(event.require_product()?, event.require_amount()?);
                Outcome::ProductAdded
            }
            Action::Insert => {
                let ack = machine.insert_coin(event.require_denomination()?)?;
                Outcome::Acknowledged(ack.to_string())
            }
            Action::Select => {
                let ack = machine.select_product(event.require_product()?)?;
                Outcome::Acknowledged(ack.to_string())
            }
            Action::Cancel => Outcome::Returned(machine.cancel()),
            Action::Submit => Outcome::Purchased(machine.submit()?),
            Action::Reset => {
                machine.reset();
                Outcome::Reset
            }
        };
        Ok(outcome)
    }

    /// Applies every event in order. Failed events, including rows that could
    /// not be read, are collected and never stop the replay.
    pub async fn replay<I>(&self, events: I) -> ReplayReport
    where
        I: IntoIterator<Item = Result<SessionEvent>>,
    {
        let mut report = ReplayReport::default();
        for event in events {
            let result = match event {
                Ok(event) => self.apply(event).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(outcome) => report.outcomes.push(outcome),
                Err(e) => {
                    warn!(error = %e, "session event failed");
                    report.failures.push(e);
                }
            }
        }
        report
    }

    /// Takes the machine back out, or returns the terminal if other clones
    /// are still alive.
    pub fn into_machine(self) -> std::result::Result<VendingMachine, Self> {
        Arc::try_unwrap(self.machine)
            .map(Mutex::into_inner)
            .map_err(|machine| Self { machine })
    }
}
