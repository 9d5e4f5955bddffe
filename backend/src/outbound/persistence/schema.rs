//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts. `email` is unique and compared exactly.
    accounts (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Text,
        /// `student` or `admin` (CHECK constraint).
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Maintenance complaints. `owner_id` never changes after insert.
    complaints (id) {
        id -> Uuid,
        owner_id -> Uuid,
        title -> Varchar,
        description -> Text,
        category -> Varchar,
        priority -> Varchar,
        status -> Varchar,
        admin_remarks -> Nullable<Text>,
        image_url -> Nullable<Text>,
        is_confirmed_by_owner -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(complaints -> accounts (owner_id));
diesel::allow_tables_to_appear_in_same_query!(accounts, complaints);
