pub mod drop_down_menu;
pub mod landing_page;
pub mod menu_list;
pub mod ordering;
pub mod product;
pub mod slug;
pub mod types;
