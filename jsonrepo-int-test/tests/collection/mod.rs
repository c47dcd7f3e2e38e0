mod add_test;
mod delete_test;
mod filter_test;
mod get_test;
mod update_test;
