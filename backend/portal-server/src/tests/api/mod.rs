mod error;
mod extractors;
mod flow_cookie;
mod users;
