//! The platform's table descriptors, in landing-page order.

use crate::descriptor::{
    DisplayColumn, FieldDescriptor, FieldKind, RenderKind, SelectOption, TableDescriptor, TableKey,
};

const USER_OPTIONS: &str = "SELECT user_id, given_name, surname FROM \"USER\" ORDER BY user_id";
const MEMBER_OPTIONS: &str = "SELECT member_user_id FROM MEMBER ORDER BY member_user_id";
const CAREGIVER_OPTIONS: &str = "SELECT caregiver_user_id FROM CAREGIVER ORDER BY caregiver_user_id";
const JOB_OPTIONS: &str = "SELECT job_id FROM JOB ORDER BY job_id";

const GENDERS: &[SelectOption] = &[
    SelectOption::fixed("Male", "Male"),
    SelectOption::fixed("Female", "Female"),
];

const CAREGIVING_TYPES: &[SelectOption] = &[
    SelectOption::fixed("babysitter", "Babysitter"),
    SelectOption::fixed("elderly care", "Elderly Care"),
    SelectOption::fixed("playmate", "Playmate"),
];

const APPOINTMENT_STATUSES: &[SelectOption] = &[
    SelectOption::fixed("pending", "Pending"),
    SelectOption::fixed("accepted", "Accepted"),
    SelectOption::fixed("declined", "Declined"),
];

// -------- users --------

const USER_COLUMNS: &[DisplayColumn] = &[
    DisplayColumn::new("user_id", "ID", RenderKind::Text),
    DisplayColumn::new("email", "Email", RenderKind::Text),
    DisplayColumn::new("given_name", "Given Name", RenderKind::Text),
    DisplayColumn::new("surname", "Surname", RenderKind::Text),
    DisplayColumn::new("city", "City", RenderKind::Text),
    DisplayColumn::new("phone_number", "Phone", RenderKind::Text),
];

const USER_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("email", "Email", FieldKind::Email).required(),
    FieldDescriptor::new("given_name", "Given Name", FieldKind::Text).required(),
    FieldDescriptor::new("surname", "Surname", FieldKind::Text).required(),
    FieldDescriptor::new("city", "City", FieldKind::Text),
    FieldDescriptor::new("phone_number", "Phone Number", FieldKind::Text),
    FieldDescriptor::new("profile_description", "Profile Description", FieldKind::Textarea),
    FieldDescriptor::new("password", "Password", FieldKind::Password).required(),
];

const USER_WRITABLE: &[&str] = &[
    "email",
    "given_name",
    "surname",
    "city",
    "phone_number",
    "profile_description",
    "password",
];

pub const USERS: TableDescriptor = TableDescriptor {
    route: "users",
    storage_name: "\"USER\"",
    key: TableKey::Single("user_id"),
    list_query: "SELECT * FROM \"USER\" ORDER BY user_id",
    display_columns: USER_COLUMNS,
    creation_fields: USER_FIELDS,
    insert_fields: USER_WRITABLE,
    update_fields: USER_WRITABLE,
};

// -------- caregivers --------

const CAREGIVER_COLUMNS: &[DisplayColumn] = &[
    DisplayColumn::new("caregiver_user_id", "User ID", RenderKind::Text),
    DisplayColumn::new("given_name", "Name", RenderKind::Text),
    DisplayColumn::new("email", "Email", RenderKind::Text),
    DisplayColumn::new("gender", "Gender", RenderKind::Text),
    DisplayColumn::new("caregiving_type", "Type", RenderKind::Text),
    DisplayColumn::new("hourly_rate", "Hourly Rate", RenderKind::Money),
];

const CAREGIVER_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("caregiver_user_id", "User ID", FieldKind::Select)
        .required()
        .with_options_query(USER_OPTIONS),
    FieldDescriptor::new("photo", "Photo URL", FieldKind::Text),
    FieldDescriptor::new("gender", "Gender", FieldKind::Select).with_options(GENDERS),
    FieldDescriptor::new("caregiving_type", "Caregiving Type", FieldKind::Select)
        .with_options(CAREGIVING_TYPES),
    FieldDescriptor::new("hourly_rate", "Hourly Rate", FieldKind::Number)
        .required()
        .with_step("0.01"),
];

pub const CAREGIVERS: TableDescriptor = TableDescriptor {
    route: "caregivers",
    storage_name: "CAREGIVER",
    key: TableKey::Single("caregiver_user_id"),
    list_query: "SELECT c.*, u.given_name, u.surname, u.email \
                 FROM CAREGIVER c JOIN \"USER\" u ON c.caregiver_user_id = u.user_id \
                 ORDER BY c.caregiver_user_id",
    display_columns: CAREGIVER_COLUMNS,
    creation_fields: CAREGIVER_FIELDS,
    insert_fields: &["caregiver_user_id", "photo", "gender", "caregiving_type", "hourly_rate"],
    update_fields: &["photo", "gender", "caregiving_type", "hourly_rate"],
};

// -------- members --------

const MEMBER_COLUMNS: &[DisplayColumn] = &[
    DisplayColumn::new("member_user_id", "User ID", RenderKind::Text),
    DisplayColumn::new("given_name", "Name", RenderKind::Text),
    DisplayColumn::new("email", "Email", RenderKind::Text),
    DisplayColumn::new("house_rules", "House Rules", RenderKind::TextLong),
    DisplayColumn::new("dependent_description", "Dependent Description", RenderKind::TextLong),
];

const MEMBER_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("member_user_id", "User ID", FieldKind::Select)
        .required()
        .with_options_query(USER_OPTIONS),
    FieldDescriptor::new("house_rules", "House Rules", FieldKind::Textarea),
    FieldDescriptor::new("dependent_description", "Dependent Description", FieldKind::Textarea),
];

pub const MEMBERS: TableDescriptor = TableDescriptor {
    route: "members",
    storage_name: "MEMBER",
    key: TableKey::Single("member_user_id"),
    list_query: "SELECT m.*, u.given_name, u.surname, u.email \
                 FROM MEMBER m JOIN \"USER\" u ON m.member_user_id = u.user_id \
                 ORDER BY m.member_user_id",
    display_columns: MEMBER_COLUMNS,
    creation_fields: MEMBER_FIELDS,
    insert_fields: &["member_user_id", "house_rules", "dependent_description"],
    update_fields: &["house_rules", "dependent_description"],
};

// -------- addresses --------

const ADDRESS_COLUMNS: &[DisplayColumn] = &[
    DisplayColumn::new("member_user_id", "Member ID", RenderKind::Text),
    DisplayColumn::new("given_name", "Member Name", RenderKind::Text),
    DisplayColumn::new("house_number", "House Number", RenderKind::Text),
    DisplayColumn::new("street", "Street", RenderKind::Text),
    DisplayColumn::new("town", "Town", RenderKind::Text),
];

const ADDRESS_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("member_user_id", "Member ID", FieldKind::Select)
        .required()
        .with_options_query(MEMBER_OPTIONS),
    FieldDescriptor::new("house_number", "House Number", FieldKind::Text),
    FieldDescriptor::new("street", "Street", FieldKind::Text),
    FieldDescriptor::new("town", "Town", FieldKind::Text),
];

pub const ADDRESSES: TableDescriptor = TableDescriptor {
    route: "addresses",
    storage_name: "ADDRESS",
    key: TableKey::Single("member_user_id"),
    list_query: "SELECT a.*, u.given_name, u.surname \
                 FROM ADDRESS a JOIN MEMBER m ON a.member_user_id = m.member_user_id \
                 JOIN \"USER\" u ON m.member_user_id = u.user_id \
                 ORDER BY a.member_user_id",
    display_columns: ADDRESS_COLUMNS,
    creation_fields: ADDRESS_FIELDS,
    insert_fields: &["member_user_id", "house_number", "street", "town"],
    update_fields: &["house_number", "street", "town"],
};

// -------- jobs --------

const JOB_COLUMNS: &[DisplayColumn] = &[
    DisplayColumn::new("job_id", "Job ID", RenderKind::Text),
    DisplayColumn::new("given_name", "Member", RenderKind::Text),
    DisplayColumn::new("required_caregiving_type", "Type", RenderKind::Text),
    DisplayColumn::new("other_requirements", "Requirements", RenderKind::TextLong),
    DisplayColumn::new("date_posted", "Date Posted", RenderKind::Text),
];

const JOB_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("member_user_id", "Member ID", FieldKind::Select)
        .required()
        .with_options_query(MEMBER_OPTIONS),
    FieldDescriptor::new("required_caregiving_type", "Required Caregiving Type", FieldKind::Select)
        .with_options(CAREGIVING_TYPES),
    FieldDescriptor::new("other_requirements", "Other Requirements", FieldKind::Textarea),
    FieldDescriptor::new("date_posted", "Date Posted", FieldKind::Date),
];

pub const JOBS: TableDescriptor = TableDescriptor {
    route: "jobs",
    storage_name: "JOB",
    key: TableKey::Single("job_id"),
    list_query: "SELECT j.*, u.given_name, u.surname \
                 FROM JOB j JOIN MEMBER m ON j.member_user_id = m.member_user_id \
                 JOIN \"USER\" u ON m.member_user_id = u.user_id \
                 ORDER BY j.job_id",
    display_columns: JOB_COLUMNS,
    creation_fields: JOB_FIELDS,
    insert_fields: &["member_user_id", "required_caregiving_type", "other_requirements", "date_posted"],
    update_fields: &["required_caregiving_type", "other_requirements", "date_posted"],
};

// -------- job_applications --------

const JOB_APPLICATION_COLUMNS: &[DisplayColumn] = &[
    DisplayColumn::new("job_id", "Job ID", RenderKind::Text),
    DisplayColumn::new("caregiver_name", "Caregiver", RenderKind::Text),
    DisplayColumn::new("member_name", "Member", RenderKind::Text),
    DisplayColumn::new("date_applied", "Date Applied", RenderKind::Text),
];

const JOB_APPLICATION_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("caregiver_user_id", "Caregiver User ID", FieldKind::Select)
        .required()
        .with_options_query(CAREGIVER_OPTIONS),
    FieldDescriptor::new("job_id", "Job ID", FieldKind::Select)
        .required()
        .with_options_query(JOB_OPTIONS),
    FieldDescriptor::new("date_applied", "Date Applied", FieldKind::Date),
];

pub const JOB_APPLICATIONS: TableDescriptor = TableDescriptor {
    route: "job_applications",
    storage_name: "JOB_APPLICATION",
    key: TableKey::Composite("caregiver_user_id", "job_id"),
    list_query: "SELECT ja.*, u1.given_name AS caregiver_name, u1.surname AS caregiver_surname, \
                 u2.given_name AS member_name, u2.surname AS member_surname \
                 FROM JOB_APPLICATION ja \
                 JOIN CAREGIVER c ON ja.caregiver_user_id = c.caregiver_user_id \
                 JOIN \"USER\" u1 ON c.caregiver_user_id = u1.user_id \
                 JOIN JOB j ON ja.job_id = j.job_id \
                 JOIN MEMBER m ON j.member_user_id = m.member_user_id \
                 JOIN \"USER\" u2 ON m.member_user_id = u2.user_id \
                 ORDER BY ja.job_id, ja.caregiver_user_id",
    display_columns: JOB_APPLICATION_COLUMNS,
    creation_fields: JOB_APPLICATION_FIELDS,
    insert_fields: &["caregiver_user_id", "job_id", "date_applied"],
    update_fields: &[],
};

// -------- appointments --------

const APPOINTMENT_COLUMNS: &[DisplayColumn] = &[
    DisplayColumn::new("appointment_id", "ID", RenderKind::Text),
    DisplayColumn::new("caregiver_name", "Caregiver", RenderKind::Text),
    DisplayColumn::new("member_name", "Member", RenderKind::Text),
    DisplayColumn::new("appointment_date", "Date", RenderKind::Text),
    DisplayColumn::new("appointment_time", "Time", RenderKind::Text),
    DisplayColumn::new("work_hours", "Hours", RenderKind::Text),
    DisplayColumn::new("status", "Status", RenderKind::Text),
];

const APPOINTMENT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("caregiver_user_id", "Caregiver User ID", FieldKind::Select)
        .required()
        .with_options_query(CAREGIVER_OPTIONS),
    FieldDescriptor::new("member_user_id", "Member User ID", FieldKind::Select)
        .required()
        .with_options_query(MEMBER_OPTIONS),
    FieldDescriptor::new("appointment_date", "Appointment Date", FieldKind::Date),
    FieldDescriptor::new("appointment_time", "Appointment Time", FieldKind::Time),
    FieldDescriptor::new("work_hours", "Work Hours", FieldKind::Number).required(),
    FieldDescriptor::new("status", "Status", FieldKind::Select).with_options(APPOINTMENT_STATUSES),
];

pub const APPOINTMENTS: TableDescriptor = TableDescriptor {
    route: "appointments",
    storage_name: "APPOINTMENT",
    key: TableKey::Single("appointment_id"),
    list_query: "SELECT a.*, u1.given_name AS caregiver_name, u1.surname AS caregiver_surname, \
                 u2.given_name AS member_name, u2.surname AS member_surname \
                 FROM APPOINTMENT a \
                 JOIN CAREGIVER c ON a.caregiver_user_id = c.caregiver_user_id \
                 JOIN \"USER\" u1 ON c.caregiver_user_id = u1.user_id \
                 JOIN MEMBER m ON a.member_user_id = m.member_user_id \
                 JOIN \"USER\" u2 ON m.member_user_id = u2.user_id \
                 ORDER BY a.appointment_id",
    display_columns: APPOINTMENT_COLUMNS,
    creation_fields: APPOINTMENT_FIELDS,
    insert_fields: &[
        "caregiver_user_id",
        "member_user_id",
        "appointment_date",
        "appointment_time",
        "work_hours",
        "status",
    ],
    update_fields: &["appointment_date", "appointment_time", "work_hours", "status"],
};

pub const TABLES: &[TableDescriptor] = &[
    USERS,
    CAREGIVERS,
    MEMBERS,
    ADDRESSES,
    JOBS,
    JOB_APPLICATIONS,
    APPOINTMENTS,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_descriptor_is_valid() {
        for table in TABLES {
            assert_eq!(table.validate(), Ok(()), "{}", table.route);
        }
    }

    #[test]
    fn only_job_applications_use_a_composite_key() {
        let composite: Vec<&str> = TABLES
            .iter()
            .filter(|t| t.primary_key().is_none())
            .map(|t| t.route)
            .collect();
        assert_eq!(composite, vec!["job_applications"]);
    }

    #[test]
    fn display_names_match_routes() {
        let names: Vec<String> = TABLES.iter().map(TableDescriptor::display_name).collect();
        assert_eq!(
            names,
            vec![
                "Users",
                "Caregivers",
                "Members",
                "Addresses",
                "Jobs",
                "Job Applications",
                "Appointments"
            ]
        );
    }
}
