mod remote_query;

pub use remote_query::RemoteAccountQuery;
