use crate::error::LifetrackError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use lifetrack_api_structs::delete_schedule::*;
use lifetrack_domain::{ReminderSchedule, ID};
use lifetrack_infra::LifetrackContext;
use tracing::error;

pub async fn delete_schedule_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<LifetrackContext>,
) -> Result<HttpResponse, LifetrackError> {
    let usecase = DeleteScheduleUseCase {
        user_id: path.user_id.clone(),
        schedule_id: path.schedule_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|schedule| HttpResponse::Ok().json(APIResponse::new(schedule)))
        .map_err(LifetrackError::from)
}

#[derive(Debug)]
struct DeleteScheduleUseCase {
    schedule_id: ID,
    user_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    Storage,
}

impl From<UseCaseError> for LifetrackError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(schedule_id) => Self::NotFound(format!(
                "The schedule with id: {}, was not found.",
                schedule_id
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteScheduleUseCase {
    type Response = ReminderSchedule;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteSchedule";

    async fn execute(&mut self, ctx: &LifetrackContext) -> Result<Self::Response, Self::Error> {
        let schedule = ctx
            .repos
            .schedules
            .find(&self.schedule_id)
            .await
            .map_err(|e| {
                error!("Failed to fetch reminder schedule: {:?}", e);
                UseCaseError::Storage
            })?;
        match schedule {
            Some(schedule) if schedule.user_id == self.user_id => {
                // Notifications already materialized from this schedule
                // are historical records and are left untouched
                ctx.repos
                    .schedules
                    .delete(&schedule.id)
                    .await
                    .map_err(|e| {
                        error!("Failed to delete reminder schedule: {:?}", e);
                        UseCaseError::Storage
                    })?;
                Ok(schedule)
            }
            _ => Err(UseCaseError::NotFound(self.schedule_id.clone())),
        }
    }
}
