use super::IMeasurementRepo;
use lifetrack_domain::{Measurement, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresMeasurementRepo {
    pool: PgPool,
}

impl PostgresMeasurementRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MeasurementRaw {
    measurement_uid: Uuid,
    user_uid: Uuid,
    variable_uid: Uuid,
    value: f64,
    unit_uid: Uuid,
    notification_uid: Option<Uuid>,
    created: i64,
}

impl Into<Measurement> for MeasurementRaw {
    fn into(self) -> Measurement {
        Measurement {
            id: self.measurement_uid.into(),
            user_id: self.user_uid.into(),
            variable_id: self.variable_uid.into(),
            value: self.value,
            unit_id: self.unit_uid.into(),
            notification_id: self.notification_uid.map(|uid| uid.into()),
            created: self.created,
        }
    }
}

#[async_trait::async_trait]
impl IMeasurementRepo for PostgresMeasurementRepo {
    async fn insert(&self, measurement: &Measurement) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO measurements
            (measurement_uid, user_uid, variable_uid, value, unit_uid, notification_uid, created)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(measurement.id.inner_ref())
        .bind(measurement.user_id.inner_ref())
        .bind(measurement.variable_id.inner_ref())
        .bind(measurement.value)
        .bind(measurement.unit_id.inner_ref())
        .bind(measurement.notification_id.as_ref().map(|id| *id.inner_ref()))
        .bind(measurement.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, measurement_id: &ID) -> anyhow::Result<Option<Measurement>> {
        let measurement: Option<MeasurementRaw> = sqlx::query_as(
            r#"
            SELECT * FROM measurements
            WHERE measurement_uid = $1
            "#,
        )
        .bind(measurement_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(measurement.map(|m| m.into()))
    }

    async fn delete(&self, measurement_id: &ID) -> anyhow::Result<Option<Measurement>> {
        let measurement: Option<MeasurementRaw> = sqlx::query_as(
            r#"
            DELETE FROM measurements
            WHERE measurement_uid = $1
            RETURNING *
            "#,
        )
        .bind(measurement_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(measurement.map(|m| m.into()))
    }
}
