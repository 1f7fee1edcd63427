diesel::table! {
    bars (id) {
        id -> Integer,
        symbol -> Text,
        date -> Text,
        open -> Text,
        high -> Text,
        low -> Text,
        close -> Text,
        volume -> BigInt,
        created_at -> Text,
    }
}

diesel::table! {
    insights (id) {
        id -> Integer,
        date -> Text,
        symbol -> Text,
        summary -> Text,
        recommendations -> Text,
        created_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(bars, insights);
