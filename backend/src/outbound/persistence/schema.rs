//! Diesel table definitions for the record store.
//!
//! These definitions must match `migrations/` exactly. One table per
//! collection; `items` and `ingredients` are JSONB documents.

diesel::table! {
    /// Customer and admin accounts.
    users (id) {
        id -> Uuid,
        /// Unique ignoring case.
        email -> Text,
        /// Argon2id PHC string.
        password_hash -> Text,
        name -> Text,
        address -> Nullable<Text>,
        points -> Int4,
        salad_streak -> Int4,
        /// `customer` or `admin`.
        role -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Salads listed on the menu.
    salads (id) {
        id -> Uuid,
        name -> Text,
        price -> Numeric,
        /// JSON array of ingredient names.
        ingredients -> Jsonb,
        image -> Nullable<Text>,
        is_default -> Bool,
    }
}

diesel::table! {
    /// Bases, toppings and dressings offered for customisation.
    custom_options (id) {
        id -> Uuid,
        /// `base`, `topping` or `dressing`.
        category -> Text,
        name -> Text,
        price -> Numeric,
        available -> Bool,
    }
}

diesel::table! {
    /// Placed orders.
    orders (id) {
        id -> Uuid,
        user_id -> Uuid,
        /// `{ "salad_id": ..., "custom": { <category>: [names] } }`.
        items -> Jsonb,
        total -> Numeric,
        /// `pending`, `prepping`, `ready` or `delivered`.
        status -> Text,
        delivery -> Bool,
        created -> Timestamptz,
    }
}

diesel::table! {
    /// Recurring salad plans.
    subscriptions (id) {
        id -> Uuid,
        user_id -> Uuid,
        /// `weekly` or `monthly`.
        plan -> Text,
        salads_per_cycle -> Int4,
        active -> Bool,
        next_delivery -> Timestamptz,
        created -> Timestamptz,
    }
}

diesel::joinable!(orders -> users (user_id));
diesel::joinable!(subscriptions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, salads, custom_options, orders, subscriptions);
