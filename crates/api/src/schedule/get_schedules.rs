use crate::error::LifetrackError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use lifetrack_api_structs::get_schedules::*;
use lifetrack_domain::{ReminderSchedule, ID};
use lifetrack_infra::LifetrackContext;
use tracing::error;

pub async fn get_schedules_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<LifetrackContext>,
) -> Result<HttpResponse, LifetrackError> {
    let usecase = GetSchedulesForVariableUseCase {
        user_id: path.user_id.clone(),
        variable_id: path.variable_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|schedules| HttpResponse::Ok().json(APIResponse::new(schedules)))
        .map_err(LifetrackError::from)
}

#[derive(Debug)]
struct GetSchedulesForVariableUseCase {
    pub user_id: ID,
    pub variable_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    Storage,
}

impl From<UseCaseError> for LifetrackError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSchedulesForVariableUseCase {
    type Response = Vec<ReminderSchedule>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSchedulesForVariable";

    async fn execute(&mut self, ctx: &LifetrackContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .schedules
            .find_by_user_and_variable(&self.user_id, &self.variable_id)
            .await
            .map_err(|e| {
                error!("Failed to fetch reminder schedules: {:?}", e);
                UseCaseError::Storage
            })
    }
}
