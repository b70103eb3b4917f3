use crate::domain::validation::{ValidationError, require_text};

#[derive(Debug, Clone, Default)]
/// Filters for `GET /users`.
///
/// `schedule_id` is accepted for call-site symmetry but is not transmitted;
/// the upstream API call never carried it.
pub struct UserFilter {
    pub show_pending: Option<bool>,
    pub only_pending: Option<bool>,
    pub search: Option<String>,
    pub schedule_id: Option<u64>,
}

#[derive(Debug, Clone)]
/// A new account for `POST /users`.
///
/// The hidden/payroll/private/trusted flags are fixed at the wire level and
/// not exposed here.
pub struct NewUser {
    email: String,
    first_name: String,
    last_name: String,
    employee_code: String,
    positions: Option<Vec<u64>>,
    schedules: Option<Vec<u64>>,
}

impl NewUser {
    /// Create a new-user request; every required field must be non-empty.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        employee_code: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            email: require_text("email", email)?,
            first_name: require_text("first_name", first_name)?,
            last_name: require_text("last_name", last_name)?,
            employee_code: require_text("employee_code", employee_code)?,
            positions: None,
            schedules: None,
        })
    }

    /// Position ids to assign on creation.
    pub fn with_positions(mut self, positions: Vec<u64>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Schedule ids (remote "locations") to assign on creation.
    pub fn with_schedules(mut self, schedules: Vec<u64>) -> Self {
        self.schedules = Some(schedules);
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn employee_code(&self) -> &str {
        &self.employee_code
    }

    pub fn positions(&self) -> Option<&[u64]> {
        self.positions.as_deref()
    }

    pub fn schedules(&self) -> Option<&[u64]> {
        self.schedules.as_deref()
    }
}

#[derive(Debug, Clone)]
/// Field set for `PUT /users/{id}`.
pub struct UserUpdate {
    first_name: String,
    last_name: String,
    email: Option<String>,
    employee_code: Option<String>,
    positions: Option<Vec<u64>>,
    schedules: Option<Vec<u64>>,
    reactivate: Option<bool>,
}

impl UserUpdate {
    /// Create an update; first and last name must be non-empty.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: require_text("first_name", first_name)?,
            last_name: require_text("last_name", last_name)?,
            email: None,
            employee_code: None,
            positions: None,
            schedules: None,
            reactivate: None,
        })
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_employee_code(mut self, employee_code: impl Into<String>) -> Self {
        self.employee_code = Some(employee_code.into());
        self
    }

    pub fn with_positions(mut self, positions: Vec<u64>) -> Self {
        self.positions = Some(positions);
        self
    }

    pub fn with_schedules(mut self, schedules: Vec<u64>) -> Self {
        self.schedules = Some(schedules);
        self
    }

    pub fn with_reactivate(mut self, reactivate: bool) -> Self {
        self.reactivate = Some(reactivate);
        self
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn employee_code(&self) -> Option<&str> {
        self.employee_code.as_deref()
    }

    pub fn positions(&self) -> Option<&[u64]> {
        self.positions.as_deref()
    }

    pub fn schedules(&self) -> Option<&[u64]> {
        self.schedules.as_deref()
    }

    pub fn reactivate(&self) -> Option<bool> {
        self.reactivate
    }
}

#[derive(Debug, Clone)]
/// Filters for `GET /shifts`.
///
/// When `all_locations` is set, `schedule_id` and `position_id` are cleared
/// before encoding, whatever the caller put there.
pub struct ShiftFilter {
    pub start: String,
    pub end: String,
    pub unpublished: bool,
    pub schedule_id: Option<u64>,
    pub position_id: Option<u64>,
    pub include_open: bool,
    pub deleted: bool,
    pub all_locations: bool,
}

impl ShiftFilter {
    /// Filter over a time window; open shifts included, deleted excluded.
    pub fn new(start: impl Into<String>, end: impl Into<String>, unpublished: bool) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            unpublished,
            schedule_id: None,
            position_id: None,
            include_open: true,
            deleted: false,
            all_locations: false,
        }
    }
}

#[derive(Debug, Clone)]
/// A new shift for `POST /shifts`.
pub struct NewShift {
    schedule_id: u64,
    position_id: u64,
    site_id: u64,
    start_time: String,
    end_time: String,
    instances: u32,
    user_id: u64,
}

impl NewShift {
    /// Create a shift request. `user_id` defaults to 0, which the API reads
    /// as an open (unassigned) shift.
    pub fn new(
        schedule_id: u64,
        position_id: u64,
        site_id: u64,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        instances: u32,
    ) -> Result<Self, ValidationError> {
        if schedule_id == 0 {
            return Err(ValidationError::MissingId {
                field: "schedule_id",
            });
        }
        if position_id == 0 {
            return Err(ValidationError::MissingId {
                field: "position_id",
            });
        }
        if site_id == 0 {
            return Err(ValidationError::MissingId { field: "site_id" });
        }
        if instances == 0 {
            return Err(ValidationError::MissingId { field: "instances" });
        }
        Ok(Self {
            schedule_id,
            position_id,
            site_id,
            start_time: require_text("start_time", start_time)?,
            end_time: require_text("end_time", end_time)?,
            instances,
            user_id: 0,
        })
    }

    /// Assign the shift to a user instead of leaving it open.
    pub fn with_user(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn schedule_id(&self) -> u64 {
        self.schedule_id
    }

    pub fn position_id(&self) -> u64 {
        self.position_id
    }

    pub fn site_id(&self) -> u64 {
        self.site_id
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn end_time(&self) -> &str {
        &self.end_time
    }

    pub fn instances(&self) -> u32 {
        self.instances
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }
}
