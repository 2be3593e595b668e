diesel::table! {
    appointments (id) {
        id -> Uuid,
        start_time -> Timestamptz,
        full_name -> Varchar,
        email -> Varchar,
        phone -> Nullable<Varchar>,
        service_id -> Int4,
        stylist_id -> Int4,
    }
}

diesel::table! {
    stylist_unavailabilities (id) {
        id -> Uuid,
        stylist_id -> Int4,
        start_time -> Timestamptz,
        end_time -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(appointments, stylist_unavailabilities);
