pub mod add_trip_form;
pub mod admin_trip_detail;
pub mod driver_trip_detail;
pub mod login_page;
pub mod map_component;
pub mod trip_list;
pub mod update_history;
