use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::authz::Role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    ApprovalStatusResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequestDto,
};
use crate::modules::evaluations::model::{CreateEvaluationDto, Evaluation};
use crate::modules::leads::model::{CreateLeadDto, Lead, UpdateLeadDto};
use crate::modules::lessons::model::{CreateLessonDto, Lesson};
use crate::modules::payments::model::{CreatePaymentDto, StudentPayment};
use crate::modules::reports::model::SummaryReport;
use crate::modules::settings::model::{OrgSetting, UpsertSettingDto};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, UpdateStudentDto,
};
use crate::modules::tariffs::model::{CreateTariffDto, Tariff, UpdateTariffDto};
use crate::modules::users::model::{
    DeleteUserDto, PaginatedProfilesResponse, Profile, SetApprovalDto, UpdateProfileDto,
};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::logout_user,
        crate::modules::auth::controller::get_me,
        crate::modules::auth::controller::pending_approval,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::set_user_approval,
        crate::modules::users::controller::delete_user,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::payments::controller::create_payment,
        crate::modules::payments::controller::get_payments,
        crate::modules::payments::controller::delete_payment,
        crate::modules::tariffs::controller::create_tariff,
        crate::modules::tariffs::controller::get_tariffs,
        crate::modules::tariffs::controller::get_tariff,
        crate::modules::tariffs::controller::update_tariff,
        crate::modules::tariffs::controller::delete_tariff,
        crate::modules::sales::controller::get_my_students,
        crate::modules::sales::controller::get_my_student,
        crate::modules::leads::controller::create_lead,
        crate::modules::leads::controller::get_leads,
        crate::modules::leads::controller::update_lead,
        crate::modules::leads::controller::delete_lead,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::get_lessons,
        crate::modules::lessons::controller::delete_lesson,
        crate::modules::evaluations::controller::create_evaluation,
        crate::modules::evaluations::controller::get_evaluations,
        crate::modules::evaluations::controller::delete_evaluation,
        crate::modules::reports::controller::get_summary,
        crate::modules::settings::controller::get_settings,
        crate::modules::settings::controller::put_setting,
    ),
    components(
        schemas(
            Role,
            Profile,
            UpdateProfileDto,
            SetApprovalDto,
            DeleteUserDto,
            PaginatedProfilesResponse,
            LoginRequest,
            LoginResponse,
            RegisterRequestDto,
            MessageResponse,
            ApprovalStatusResponse,
            ErrorResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            PaginatedStudentsResponse,
            StudentPayment,
            CreatePaymentDto,
            Tariff,
            CreateTariffDto,
            UpdateTariffDto,
            Lead,
            CreateLeadDto,
            UpdateLeadDto,
            Lesson,
            CreateLessonDto,
            Evaluation,
            CreateEvaluationDto,
            SummaryReport,
            OrgSetting,
            UpsertSettingDto,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, and the approval gate"),
        (name = "Users", description = "Profile administration (superadmin)"),
        (name = "Students", description = "Student records"),
        (name = "Payments", description = "Student payments"),
        (name = "Tariffs", description = "Pricing plans"),
        (name = "Sales", description = "Sales-side student views"),
        (name = "Leads", description = "Prospective students"),
        (name = "Lessons", description = "Lesson scheduling"),
        (name = "Evaluations", description = "Student evaluations"),
        (name = "Reports", description = "Management aggregates"),
        (name = "Settings", description = "Organization settings")
    ),
    info(
        title = "Tutorium API",
        version = "0.1.0",
        description = "Role-based administration service for a learning center: accounts with an approval workflow, student records, tariffs, and payments over row-secured PostgreSQL.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
