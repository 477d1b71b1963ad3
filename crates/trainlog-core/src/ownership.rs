//! Single guard for "caller must own this record".
//!
//! Every aggregate read or mutation by identifier goes through
//! [`ensure_owner`], which turns a foreign record into
//! [`TrainlogError::Unauthorized`] so the boundary can answer 403
//! while absence stays a 404.

use uuid::Uuid;

use crate::error::{TrainlogError, TrainlogResult};
use crate::models::body_weight::BodyWeight;
use crate::models::exercise::Exercise;
use crate::models::menu::Menu;
use crate::models::workout::Workout;

/// A record with a single owning user.
pub trait Owned {
    const ENTITY: &'static str;

    fn record_id(&self) -> Uuid;

    /// The user allowed to mutate this record, if any.
    fn owner_id(&self) -> Option<Uuid>;
}

/// Return `record` if `caller` owns it, otherwise `Unauthorized`.
pub fn ensure_owner<T: Owned>(record: T, caller: Uuid) -> TrainlogResult<T> {
    if record.owner_id() == Some(caller) {
        Ok(record)
    } else {
        Err(TrainlogError::Unauthorized {
            entity: T::ENTITY.into(),
            id: record.record_id().to_string(),
        })
    }
}

impl Owned for Workout {
    const ENTITY: &'static str = "workout";

    fn record_id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.user_id)
    }
}

impl Owned for Menu {
    const ENTITY: &'static str = "menu";

    fn record_id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.user_id)
    }
}

impl Owned for BodyWeight {
    const ENTITY: &'static str = "body_weight";

    fn record_id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.user_id)
    }
}

/// Presets have no owner, so they fail the guard like a foreign custom.
impl Owned for Exercise {
    const ENTITY: &'static str = "exercise";

    fn record_id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Option<Uuid> {
        if self.is_custom { self.user_id } else { None }
    }
}
