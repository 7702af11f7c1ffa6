pub mod graph {
    pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v22.0";
    pub const BASE_URL_ENV: &str = "FB_GRAPH_URL";
    pub const TIMEOUT_ENV: &str = "FB_GRAPH_TIMEOUT_MS";
    pub const ACCESS_TOKEN_PARAM: &str = "access_token";
    pub const ALLOWED_SCHEMES: &[&str] = &["http", "https"];
}

pub mod credentials {
    pub const TOKEN_FLAG: &str = "--fb-token";
    pub const TOKEN_ENV: &str = "FB_ACCESS_TOKEN";
    pub const DOTENV_FILE: &str = ".env";
}

pub mod encoding {
    /// Keys whose list/object values are sent as a JSON document.
    pub const JSON_ENCODED: &[&str] = &[
        "filtering",
        "time_range",
        "time_ranges",
        "effective_status",
        "special_ad_categories",
        "objective",
        "buyer_guarantee_agreement_status",
    ];

    /// Keys whose string lists are sent as `a,b,c`.
    pub const COMMA_JOINED: &[&str] = &[
        "fields",
        "action_attribution_windows",
        "action_breakdowns",
        "breakdowns",
    ];
}

pub mod insights {
    pub const ALL_DAYS: &str = "all_days";
    pub const BOOLEAN_FLAGS: &[&str] = &[
        "default_summary",
        "use_account_attribution_setting",
        "use_unified_attribution_setting",
    ];
    /// Handled by the insights precedence rules, never by the generic pass.
    pub const TIME_KEYS: &[&str] = &[
        "date_preset",
        "time_range",
        "time_ranges",
        "since",
        "until",
        "time_increment",
    ];
}

pub mod edges {
    /// Node for the token owner.
    pub const ME: &str = "me";
    pub const AD_ACCOUNTS: &str = "adaccounts";
    pub const INSIGHTS: &str = "insights";
    pub const ADS: &str = "ads";
    pub const ADSETS: &str = "adsets";
    pub const CAMPAIGNS: &str = "campaigns";
    pub const AD_CREATIVES: &str = "adcreatives";
    pub const ACTIVITIES: &str = "activities";
    /// Timeline edges take their window keys as a separately encoded group.
    pub const TIMELINE: &[&str] = &[ACTIVITIES];
    pub const TIMELINE_WINDOW_KEYS: &[&str] = &["time_range", "since", "until"];
}

pub mod fields {
    pub const AD_ACCOUNT_LIST: &str = "name,account_id,id";
    pub const AD_ACCOUNT_DEFAULT: &[&str] = &[
        "name",
        "business_name",
        "age",
        "account_status",
        "balance",
        "amount_spent",
        "attribution_spec",
        "account_id",
        "business",
        "business_city",
        "brand_safety_content_filter_levels",
        "currency",
        "created_time",
        "id",
    ];
}

pub mod limits {
    pub const ERROR_BODY_PREVIEW_BYTES: usize = 4_096;
}
