use super::IMeasurementRepo;
use crate::repos::shared::inmemory_repo::*;
use lifetrack_domain::{Measurement, ID};

pub struct InMemoryMeasurementRepo {
    measurements: std::sync::Mutex<Vec<Measurement>>,
}

impl InMemoryMeasurementRepo {
    pub fn new() -> Self {
        Self {
            measurements: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IMeasurementRepo for InMemoryMeasurementRepo {
    async fn insert(&self, measurement: &Measurement) -> anyhow::Result<()> {
        insert(measurement, &self.measurements);
        Ok(())
    }

    async fn find(&self, measurement_id: &ID) -> anyhow::Result<Option<Measurement>> {
        Ok(find(measurement_id, &self.measurements))
    }

    async fn delete(&self, measurement_id: &ID) -> anyhow::Result<Option<Measurement>> {
        Ok(delete(measurement_id, &self.measurements))
    }
}
