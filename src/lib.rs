pub mod shared {
    pub mod core {
        pub mod table;
    }
    pub mod infrastructure {
        pub mod table_store;
    }
}

pub mod modules {
    pub mod shifts {
        pub mod core {
            pub mod registration;
            pub mod roster;
            pub mod shift;
            pub mod slots;
        }
        pub mod use_cases {
            pub mod errors;
            pub mod list_available_slots {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod register_volunteer {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod list_registrations {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod sign_up_page {
                pub mod handler;
                pub mod view;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
}

pub mod shell;
