mod origin;
mod role;
mod user_record;
