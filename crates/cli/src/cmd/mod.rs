mod bump;
mod commit_msg;
mod csv_sql;
mod deploy;

pub use bump::cmd_bump;
pub use commit_msg::cmd_commit_msg;
pub use csv_sql::cmd_csv_sql;
pub use deploy::cmd_deploy;
