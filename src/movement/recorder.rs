use anyhow::Result;
use tracing::{debug, info, instrument};

use crate::utils::clock::Clock;

use super::{
    entities::{MovementId, MovementRecord, NewMovement},
    store::MovementStore,
};

/// Bridges user input and [MovementStore]. The recorder stamps new movements with an id and the
/// current time, and only returns once the store has persisted them, so whatever is computed
/// from the returned log already reflects the durable state.
pub struct MovementRecorder<S: MovementStore> {
    store: S,
    clock: Box<dyn Clock>,
}

impl<S: MovementStore> MovementRecorder<S> {
    pub fn new(store: S, clock: Box<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Current log, newest first.
    pub async fn log(&self) -> Result<Vec<MovementRecord>> {
        self.store.load_all().await
    }

    #[instrument(skip(self))]
    pub async fn record(&self, movement: NewMovement) -> Result<Vec<MovementRecord>> {
        let movement = movement.validate()?;
        let log = self.store.load_all().await?;

        let now = self.clock.time();
        let newest = log.iter().map(|v| v.id).max();
        let record = MovementRecord::from_new(MovementId::next(now, newest), now, movement);
        debug!("Appending movement {:?}", record);

        let id = record.id;
        let updated = self.store.append(record).await?;
        info!("Recorded movement {id}, log has {} entries", updated.len());
        Ok(updated)
    }
}
