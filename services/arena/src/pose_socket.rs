use std::{io, net::SocketAddr};
use tokio::net::UdpSocket;

/// Largest datagram the sender may produce.
pub const MAX_DATAGRAM_LEN: usize = 65_507;

/// Non-blocking UDP endpoint the pose sender streams to.
pub struct PoseSocket {
    socket: UdpSocket,
    buffer: Vec<u8>,
}

impl PoseSocket {
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self {
            socket,
            buffer: vec![0; MAX_DATAGRAM_LEN],
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Wait until at least one datagram is pending.
    pub async fn readable(&self) -> io::Result<()> {
        self.socket.readable().await
    }

    /// Take every datagram pending on the socket without waiting.
    pub fn drain(&mut self) -> io::Result<Vec<Vec<u8>>> {
        let mut datagrams = Vec::new();
        loop {
            match self.socket.try_recv(&mut self.buffer) {
                Ok(len) => datagrams.push(self.buffer[..len].to_vec()),
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => break,
                // ICMP port unreachable of an earlier reply, nothing to do with the stream
                Err(err) if err.kind() == io::ErrorKind::ConnectionReset => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(datagrams)
    }
}
