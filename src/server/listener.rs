// Listener setup module
// Binds the listening socket before the accept loop starts

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create the bound `TcpListener`.
///
/// `SO_REUSEADDR` allows rebinding the port while a previous socket sits in
/// TIME_WAIT, so a quickly restarted listener does not fail to bind.
pub fn create_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    // Match the socket domain to the bind address family
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;

    // Non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
