pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod gateway;
    }
}

pub mod modules {
    pub mod entities {
        pub mod core {
            pub mod collection;
            pub mod entity;
            pub mod errors;
            pub mod model;
            pub mod observers;
        }
        pub mod use_cases {
            pub mod delete_with_confirmation {
                pub mod confirmer;
                pub mod handler;
            }
        }
    }
    pub mod membership {
        pub mod core {
            pub mod coalesce;
            pub mod period;
            pub mod span;
        }
        pub mod models {
            pub mod key;
            pub mod member;
            pub mod span;
        }
        pub mod use_cases {
            pub mod edit_membership_periods {
                pub mod form;
                pub mod period_list;
            }
        }
    }
}

pub mod shell;
