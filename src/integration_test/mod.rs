mod pages;
mod test_util;
mod todo_api;
