use crate::api::absence::{AbsenceFilter, AbsenceListResponse, CreateAbsence};
use crate::api::attendance::AttendanceFilter;
use crate::api::report::RawReportQuery;
use crate::core::summary::{RawReportRow, SummaryRow};
use crate::model::absence_request::{AbsenceRequest, AbsenceStatus};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::profile::Profile;
use crate::model::role::Role;
use crate::models::{LoginReqDto, RegisterReq};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Logia Attendance API",
        version = "1.0.0",
        description = r#"
## Logia Attendance Tracker

This API powers an **employee attendance tracker**: daily check-in and
check-out, absence requests with an approval workflow, and summary
reporting.

### 🔹 Key Features
- **Attendance**
  - Check in / check out, derived live status, full history
- **Absence Requests**
  - Submit a dated request, admin approve / reject / revert / delete;
    approval materializes one Absent record per day of the range
- **Reporting**
  - Per-employee summary rows and raw record rows for export

### 🔐 Security
Endpoints under the API prefix are protected with **JWT Bearer
authentication**. Administrative operations additionally require the
**admin** role, which is read from the employee profile.

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for the absence request list

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::my_status,
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::list_attendance,

        crate::api::absence::create_absence,
        crate::api::absence::absence_list,
        crate::api::absence::get_absence,
        crate::api::absence::approve_absence,
        crate::api::absence::reject_absence,
        crate::api::absence::revert_absence,
        crate::api::absence::delete_absence,

        crate::api::report::summary_report,
        crate::api::report::raw_report,

        crate::api::profile::me,
        crate::api::profile::list_profiles
    ),
    components(
        schemas(
            AttendanceRecord,
            AttendanceStatus,
            AttendanceFilter,
            AbsenceRequest,
            AbsenceStatus,
            AbsenceFilter,
            AbsenceListResponse,
            CreateAbsence,
            Profile,
            Role,
            SummaryRow,
            RawReportRow,
            RawReportQuery,
            RegisterReq,
            LoginReqDto
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Check-in / check-out and derived status APIs"),
        (name = "Absence", description = "Absence request workflow APIs"),
        (name = "Report", description = "Summary and raw report APIs"),
        (name = "Profile", description = "Employee profile APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
