//! Diesel table definitions, kept in sync with `migrations/`.

diesel::table! {
    users (id) {
        id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        first_name -> Text,
        last_name -> Text,
        email -> Text,
    }
}

diesel::table! {
    calendars (id) {
        id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        name -> Text,
        user_id -> Uuid,
    }
}

diesel::table! {
    appointments (id) {
        id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        subject -> Text,
        description -> Nullable<Text>,
        whole_day -> Bool,
        start_at -> Timestamptz,
        end_at -> Nullable<Timestamptz>,
        calendar_id -> Uuid,
    }
}

diesel::table! {
    users_appointments (appointment_id, user_id) {
        appointment_id -> Uuid,
        user_id -> Uuid,
    }
}

diesel::joinable!(calendars -> users (user_id));
diesel::joinable!(appointments -> calendars (calendar_id));
diesel::joinable!(users_appointments -> appointments (appointment_id));
diesel::joinable!(users_appointments -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, calendars, appointments, users_appointments);
