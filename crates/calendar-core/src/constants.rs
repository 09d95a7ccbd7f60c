/// Route components shared by the router and the integration tests.
pub const USER_ROUTE_COMPONENT: &str = "user";
pub const CALENDAR_ROUTE_COMPONENT: &str = "calendar";
pub const APPOINTMENT_ROUTE_COMPONENT: &str = "appointment";
pub const ADD_ATTENDEES_ROUTE_COMPONENT: &str = "add-attendees";
pub const REMOVE_ATTENDEES_ROUTE_COMPONENT: &str = "remove-attendees";
pub const HEALTHCHECK_ROUTE_COMPONENT: &str = "healthcheck";

pub const USER_ROUTE_PREFIX: &str = const_str::concat!("/", USER_ROUTE_COMPONENT);
pub const CALENDAR_ROUTE_PREFIX: &str = const_str::concat!("/", CALENDAR_ROUTE_COMPONENT);
pub const APPOINTMENT_ROUTE_PREFIX: &str = const_str::concat!("/", APPOINTMENT_ROUTE_COMPONENT);
