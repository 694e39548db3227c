//! Diesel table definitions for the booking schema.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// Rentable bungalows.
    bungalows (id) {
        id -> Int4,
        bungalow_name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Restriction kinds: 1 reservation, 2 owner block.
    restrictions (id) {
        id -> Int4,
        restriction_name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Guest reservations. `processed` is 0 until staff review it.
    reservations (id) {
        id -> Int4,
        full_name -> Varchar,
        email -> Varchar,
        phone -> Varchar,
        start_date -> Date,
        end_date -> Date,
        bungalow_id -> Int4,
        processed -> Int2,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Date ranges during which a bungalow cannot be booked. The range is
    /// half-open: `end_date` is the departure day.
    bungalow_restrictions (id) {
        id -> Int4,
        start_date -> Date,
        end_date -> Date,
        bungalow_id -> Int4,
        reservation_id -> Nullable<Int4>,
        restriction_id -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(reservations -> bungalows (bungalow_id));
diesel::joinable!(bungalow_restrictions -> bungalows (bungalow_id));
diesel::joinable!(bungalow_restrictions -> reservations (reservation_id));
diesel::joinable!(bungalow_restrictions -> restrictions (restriction_id));

diesel::allow_tables_to_appear_in_same_query!(
    bungalows,
    restrictions,
    reservations,
    bungalow_restrictions,
);
