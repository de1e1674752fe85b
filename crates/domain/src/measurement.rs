use crate::shared::entity::{Entity, ID};

/// A logged value for a tracked variable.
///
/// Measurements are owned by the wider platform; this crate only creates
/// one when a notification is completed and deletes it again on undo, so
/// just the fields that flow through that lifecycle are modeled here.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub id: ID,
    pub user_id: ID,
    pub variable_id: ID,
    pub value: f64,
    pub unit_id: ID,
    /// The notification this measurement was logged from, if any
    pub notification_id: Option<ID>,
    pub created: i64,
}

impl Measurement {
    pub fn new(
        user_id: ID,
        variable_id: ID,
        value: f64,
        unit_id: ID,
        notification_id: Option<ID>,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            variable_id,
            value,
            unit_id,
            notification_id,
            created: now,
        }
    }
}

impl Entity for Measurement {
    fn id(&self) -> &ID {
        &self.id
    }
}
