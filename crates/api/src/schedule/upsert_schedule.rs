use crate::error::LifetrackError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono_tz::Tz;
use lifetrack_api_structs::upsert_schedule::*;
use lifetrack_domain::{RecurrenceRule, ReminderSchedule, TimeOfDay, ID};
use lifetrack_infra::LifetrackContext;
use tracing::error;

pub async fn upsert_schedule_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<LifetrackContext>,
) -> Result<HttpResponse, LifetrackError> {
    let usecase = UpsertScheduleUseCase {
        user_id: path.user_id.clone(),
        variable_id: path.variable_id.clone(),
        schedule_id: body.0.schedule_id,
        recurrence: body.0.recurrence,
        time_of_day: body.0.time_of_day,
        timezone: body.0.timezone,
        default_value: body.0.default_value,
        active: body.0.active,
    };

    execute(usecase, &ctx)
        .await
        .map(|schedule| HttpResponse::Ok().json(APIResponse::new(schedule)))
        .map_err(LifetrackError::from)
}

#[derive(Debug)]
struct UpsertScheduleUseCase {
    pub user_id: ID,
    pub variable_id: ID,
    pub schedule_id: Option<ID>,
    pub recurrence: String,
    pub time_of_day: String,
    pub timezone: String,
    pub default_value: Option<f64>,
    pub active: Option<bool>,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidRecurrenceRule(String),
    InvalidTimeOfDay(String),
    InvalidTimezone(String),
    ScheduleNotFound(ID),
    Storage,
}

impl From<UseCaseError> for LifetrackError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidRecurrenceRule(rule) => Self::BadClientData(format!(
                "Invalid recurrence rule: `{}`. It should be a valid RRULE expression like `FREQ=DAILY`.",
                rule
            )),
            UseCaseError::InvalidTimeOfDay(time) => Self::BadClientData(format!(
                "Invalid time of day: `{}`. It should be on the format `HH:MM`.",
                time
            )),
            UseCaseError::InvalidTimezone(tz) => Self::BadClientData(format!(
                "Invalid timezone: {}. It should be a valid IANA TimeZone.",
                tz
            )),
            UseCaseError::ScheduleNotFound(schedule_id) => Self::NotFound(format!(
                "The schedule with id: {}, was not found.",
                schedule_id
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpsertScheduleUseCase {
    type Response = ReminderSchedule;

    type Error = UseCaseError;

    const NAME: &'static str = "UpsertSchedule";

    async fn execute(&mut self, ctx: &LifetrackContext) -> Result<Self::Response, Self::Error> {
        let recurrence: RecurrenceRule = self
            .recurrence
            .parse()
            .map_err(|_| UseCaseError::InvalidRecurrenceRule(self.recurrence.clone()))?;
        let time_of_day: TimeOfDay = self
            .time_of_day
            .parse()
            .map_err(|_| UseCaseError::InvalidTimeOfDay(self.time_of_day.clone()))?;
        let timezone: Tz = match self.timezone.parse() {
            Ok(tz) => tz,
            Err(_) => return Err(UseCaseError::InvalidTimezone(self.timezone.clone())),
        };

        match &self.schedule_id {
            Some(schedule_id) => {
                let schedule = ctx
                    .repos
                    .schedules
                    .find(schedule_id)
                    .await
                    .map_err(|e| {
                        error!("Failed to fetch reminder schedule: {:?}", e);
                        UseCaseError::Storage
                    })?;
                let mut schedule = match schedule {
                    Some(schedule)
                        if schedule.user_id == self.user_id
                            && schedule.variable_id == self.variable_id =>
                    {
                        schedule
                    }
                    _ => return Err(UseCaseError::ScheduleNotFound(schedule_id.clone())),
                };

                schedule.recurrence = recurrence;
                schedule.time_of_day = time_of_day;
                schedule.timezone = timezone;
                schedule.default_value = self.default_value;
                if let Some(active) = self.active {
                    schedule.active = active;
                }
                schedule.updated = ctx.sys.get_timestamp_millis();

                ctx.repos.schedules.save(&schedule).await.map_err(|e| {
                    error!("Failed to save reminder schedule: {:?}", e);
                    UseCaseError::Storage
                })?;
                Ok(schedule)
            }
            None => {
                let mut schedule = ReminderSchedule::new(
                    self.user_id.clone(),
                    self.variable_id.clone(),
                    recurrence,
                    time_of_day,
                    timezone,
                    ctx.sys.get_timestamp_millis(),
                );
                schedule.default_value = self.default_value;
                if let Some(active) = self.active {
                    schedule.active = active;
                }

                ctx.repos.schedules.insert(&schedule).await.map_err(|e| {
                    error!("Failed to insert reminder schedule: {:?}", e);
                    UseCaseError::Storage
                })?;
                Ok(schedule)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use lifetrack_infra::setup_context_inmemory;

    fn usecase(user_id: ID, variable_id: ID) -> UpsertScheduleUseCase {
        UpsertScheduleUseCase {
            user_id,
            variable_id,
            schedule_id: None,
            recurrence: "FREQ=DAILY".into(),
            time_of_day: "09:00".into(),
            timezone: "America/New_York".into(),
            default_value: Some(3.0),
            active: None,
        }
    }

    #[actix_web::test]
    async fn creates_schedule_and_rule_round_trips() {
        let ctx = setup_context_inmemory();
        let user_id = ID::new();
        let variable_id = ID::new();

        let mut usecase = usecase(user_id.clone(), variable_id.clone());
        let schedule = usecase.execute(&ctx).await.unwrap();

        assert_eq!(schedule.recurrence.as_str(), "FREQ=DAILY");
        assert_eq!(schedule.time_of_day.to_string(), "09:00");
        assert_eq!(schedule.default_value, Some(3.0));
        assert!(schedule.active);

        // Persisted row carries the rule verbatim
        let stored = ctx
            .repos
            .schedules
            .find(&schedule.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.recurrence.as_str(), "FREQ=DAILY");
    }

    #[actix_web::test]
    async fn rejects_malformed_recurrence_and_persists_nothing() {
        let ctx = setup_context_inmemory();
        let user_id = ID::new();
        let variable_id = ID::new();

        let mut usecase = usecase(user_id.clone(), variable_id.clone());
        usecase.recurrence = "FREQ=WHENEVER".into();

        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::InvalidRecurrenceRule(_))));

        let stored = ctx
            .repos
            .schedules
            .find_by_user_and_variable(&user_id, &variable_id)
            .await
            .unwrap();
        assert!(stored.is_empty());
    }

    #[actix_web::test]
    async fn rejects_invalid_timezone_and_time_of_day() {
        let ctx = setup_context_inmemory();

        let mut usecase = usecase(ID::new(), ID::new());
        usecase.timezone = "Middle/Earth".into();
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidTimezone(_))
        ));

        let mut usecase = self::usecase(ID::new(), ID::new());
        usecase.time_of_day = "25:00".into();
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidTimeOfDay(_))
        ));
    }

    #[actix_web::test]
    async fn updates_schedule_in_place() {
        let ctx = setup_context_inmemory();
        let user_id = ID::new();
        let variable_id = ID::new();

        let mut create = usecase(user_id.clone(), variable_id.clone());
        let schedule = create.execute(&ctx).await.unwrap();

        let mut update = usecase(user_id.clone(), variable_id.clone());
        update.schedule_id = Some(schedule.id.clone());
        update.recurrence = "FREQ=WEEKLY;BYDAY=MO".into();
        update.default_value = None;

        let updated = update.execute(&ctx).await.unwrap();
        assert_eq!(updated.id, schedule.id);
        assert_eq!(updated.recurrence.as_str(), "FREQ=WEEKLY;BYDAY=MO");
        assert_eq!(updated.default_value, None);

        // Still a single schedule for the variable
        let stored = ctx
            .repos
            .schedules
            .find_by_user_and_variable(&user_id, &variable_id)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[actix_web::test]
    async fn rejects_update_of_foreign_schedule() {
        let ctx = setup_context_inmemory();
        let owner = ID::new();
        let variable_id = ID::new();

        let mut create = usecase(owner.clone(), variable_id.clone());
        let schedule = create.execute(&ctx).await.unwrap();

        let mut update = usecase(ID::new(), variable_id.clone());
        update.schedule_id = Some(schedule.id.clone());
        update.recurrence = "FREQ=YEARLY".into();

        assert!(matches!(
            update.execute(&ctx).await,
            Err(UseCaseError::ScheduleNotFound(_))
        ));

        // Stored schedule is unchanged
        let stored = ctx
            .repos
            .schedules
            .find(&schedule.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.recurrence.as_str(), "FREQ=DAILY");
    }
}
