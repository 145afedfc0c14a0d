pub mod catalog;
pub mod category_list_response;
pub mod launch_dto;
pub mod launch_response;
pub mod sync_response;
pub mod sync_users_response;
