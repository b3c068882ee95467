pub mod probe;
pub mod remote;

pub use probe::ConnectivityProbe;
pub use remote::RemoteApi;
