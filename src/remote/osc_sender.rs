use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use rosc::{OscBundle, OscMessage, OscPacket, OscTime, encoder};

use crate::cell::{CellData, CellValue};
use crate::config::OscConfig;
use crate::error::{Error, Result};

// Grid coordinates 0..=9 are spelled out in addresses
const NUMBER_NAMES: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Per-cell address suffixes in send order, paired with the field they carry
pub const CELL_FIELDS: [(&str, fn(&CellData) -> CellValue); 8] = [
    ("r", |c| c.avg_red),
    ("g", |c| c.avg_green),
    ("b", |c| c.avg_blue),
    ("brightness", |c| c.brightness),
    ("contrast", |c| c.contrast),
    ("dominant_r", |c| c.dominant_color[0]),
    ("dominant_g", |c| c.dominant_color[1]),
    ("dominant_b", |c| c.dominant_color[2]),
];

/// OSC "immediately" timetag
const IMMEDIATE: OscTime = OscTime { seconds: 0, fractional: 1 };

/// Convert a grid coordinate to its address word ("zero".."nine").
/// Anything outside 0..=9 falls back to the plain decimal string (e.g. -1 -> "-1").
pub fn num_to_name(n: i64) -> String {
    match usize::try_from(n).ok().and_then(|i| NUMBER_NAMES.get(i)) {
        Some(name) => name.to_string(),
        None => n.to_string(),
    }
}

/// Base address for a cell, e.g. row 3 col 7 -> `/cell/three/seven`
pub fn cell_base_address(row: i64, col: i64) -> String {
    format!("/cell/{}/{}", num_to_name(row), num_to_name(col))
}

/// Build one bundle holding 8 messages per cell, in input order.
/// Fails on the first value that cannot become an OSC argument.
pub fn build_bundle(cells: &[CellData]) -> Result<OscBundle> {
    let mut content = Vec::with_capacity(cells.len() * CELL_FIELDS.len());

    for cell in cells {
        let base_address = cell_base_address(cell.row, cell.col);
        for (suffix, field) in CELL_FIELDS.iter() {
            content.push(OscPacket::Message(OscMessage {
                addr: format!("{}/{}", base_address, suffix),
                args: vec![field(cell).to_osc()?],
            }));
        }
    }

    Ok(OscBundle { timetag: IMMEDIATE, content })
}

/// Outbound side of the publisher. One call is one datagram.
pub trait Transport {
    fn send(&self, payload: &[u8]) -> io::Result<usize>;
}

/// Unconnected UDP socket that sends every datagram to a fixed destination.
/// No route lookup and no ICMP error reporting, so sends to a closed port succeed.
pub struct UdpTransport {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpTransport {
    /// Bind an ephemeral local port of the same address family as `target`.
    pub fn bind(target: SocketAddr) -> io::Result<Self> {
        let bind_addr = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(bind_addr)?;
        Ok(Self { socket, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl Transport for UdpTransport {
    fn send(&self, payload: &[u8]) -> io::Result<usize> {
        self.socket.send_to(payload, self.target)
    }
}

/// Publishes grid cell statistics to one OSC destination
pub struct GridOscPublisher<T: Transport = UdpTransport> {
    transport: T,
    target_addr: String,
}

impl GridOscPublisher<UdpTransport> {
    /// Resolve the configured destination and set up the UDP socket.
    /// Errors here are always `Error::Configuration`; no packet goes out.
    pub fn new(config: &OscConfig) -> Result<Self> {
        if config.host.trim().is_empty() {
            return Err(Error::Configuration("OSC host is empty".to_string()));
        }
        if config.port == 0 {
            return Err(Error::Configuration("OSC port must be non-zero".to_string()));
        }

        let target_addr = config.target_addr();
        let target = (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(|e| Error::Configuration(format!("cannot resolve {}: {}", target_addr, e)))?
            .next()
            .ok_or_else(|| Error::Configuration(format!("no address found for {}", target_addr)))?;

        let transport = UdpTransport::bind(target)
            .map_err(|e| Error::Configuration(format!("cannot open UDP socket for {}: {}", target_addr, e)))?;

        Ok(Self::with_transport(transport, target_addr))
    }
}

impl<T: Transport> GridOscPublisher<T> {
    pub fn with_transport(transport: T, target_addr: impl Into<String>) -> Self {
        Self {
            transport,
            target_addr: target_addr.into(),
        }
    }

    pub fn target_addr(&self) -> &str {
        &self.target_addr
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send all cells as one bundle in one datagram.
    ///
    /// The bundle is fully built and encoded before anything is sent, so an
    /// encoding failure never reaches the wire. An empty slice still sends an
    /// empty bundle. Send errors are returned as-is, without retry.
    pub fn publish(&self, cells: &[CellData]) -> Result<()> {
        let bundle = build_bundle(cells)?;
        let buf = encoder::encode(&OscPacket::Bundle(bundle))?;
        self.transport.send(&buf)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosc::{OscType, decoder};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<Vec<u8>>>,
    }

    impl Transport for RecordingTransport {
        fn send(&self, payload: &[u8]) -> io::Result<usize> {
            self.sent.lock().unwrap().push(payload.to_vec());
            Ok(payload.len())
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn send(&self, _payload: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"))
        }
    }

    fn cell(row: i64, col: i64) -> CellData {
        CellData {
            row,
            col,
            avg_red: 120.into(),
            avg_green: 80.into(),
            avg_blue: 40.into(),
            brightness: 0.5.into(),
            contrast: 1.2.into(),
            dominant_color: [200.into(), 10.into(), 5.into()],
        }
    }

    fn messages(bundle: &OscBundle) -> Vec<(String, OscType)> {
        bundle
            .content
            .iter()
            .map(|p| match p {
                OscPacket::Message(m) => (m.addr.clone(), m.args[0].clone()),
                OscPacket::Bundle(_) => panic!("nested bundle"),
            })
            .collect()
    }

    fn decode_bundle(buf: &[u8]) -> OscBundle {
        match decoder::decode_udp(buf).unwrap().1 {
            OscPacket::Bundle(b) => b,
            OscPacket::Message(m) => panic!("expected bundle, got message {}", m.addr),
        }
    }

    #[test]
    fn digits_map_to_words() {
        let words = ["zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine"];
        for (n, word) in words.iter().enumerate() {
            assert_eq!(num_to_name(n as i64), *word);
        }
    }

    #[test]
    fn out_of_range_falls_back_to_decimal() {
        assert_eq!(num_to_name(10), "10");
        assert_eq!(num_to_name(123), "123");
        assert_eq!(num_to_name(-1), "-1");
        assert_eq!(num_to_name(i64::MIN), i64::MIN.to_string());
        assert_eq!(num_to_name(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn base_address_spells_coordinates() {
        assert_eq!(cell_base_address(3, 7), "/cell/three/seven");
        assert_eq!(cell_base_address(12, 0), "/cell/12/zero");
    }

    #[test]
    fn fields_map_to_suffixes_in_order() {
        let bundle = build_bundle(&[cell(0, 0)]).unwrap();
        assert_eq!(
            messages(&bundle),
            vec![
                ("/cell/zero/zero/r".to_string(), OscType::Int(120)),
                ("/cell/zero/zero/g".to_string(), OscType::Int(80)),
                ("/cell/zero/zero/b".to_string(), OscType::Int(40)),
                ("/cell/zero/zero/brightness".to_string(), OscType::Float(0.5)),
                ("/cell/zero/zero/contrast".to_string(), OscType::Float(1.2)),
                ("/cell/zero/zero/dominant_r".to_string(), OscType::Int(200)),
                ("/cell/zero/zero/dominant_g".to_string(), OscType::Int(10)),
                ("/cell/zero/zero/dominant_b".to_string(), OscType::Int(5)),
            ]
        );
        assert_eq!(bundle.timetag, IMMEDIATE);
    }

    #[test]
    fn cells_stay_in_input_order() {
        let bundle = build_bundle(&[cell(0, 0), cell(1, 1)]).unwrap();
        let addrs: Vec<String> = messages(&bundle).into_iter().map(|(a, _)| a).collect();
        assert_eq!(addrs.len(), 16);
        assert!(addrs[..8].iter().all(|a| a.starts_with("/cell/zero/zero/")));
        assert!(addrs[8..].iter().all(|a| a.starts_with("/cell/one/one/")));
    }

    #[test]
    fn message_count_is_eight_per_cell() {
        for n in [0usize, 1, 5, 100] {
            let cells: Vec<CellData> = (0..n as i64).map(|i| cell(i / 10, i % 10)).collect();
            assert_eq!(build_bundle(&cells).unwrap().content.len(), 8 * n);
        }
    }

    #[test]
    fn publish_sends_one_datagram() {
        let publisher = GridOscPublisher::with_transport(RecordingTransport::default(), "test");
        publisher.publish(&[cell(2, 4), cell(9, 9)]).unwrap();

        let sent = publisher.transport().sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let bundle = decode_bundle(&sent[0]);
        assert_eq!(bundle.content.len(), 16);
        assert_eq!(messages(&bundle)[0].0, "/cell/two/four/r");
        assert_eq!(messages(&bundle)[15].0, "/cell/nine/nine/dominant_b");
    }

    #[test]
    fn empty_input_sends_empty_bundle() {
        let publisher = GridOscPublisher::with_transport(RecordingTransport::default(), "test");
        publisher.publish(&[]).unwrap();

        let sent = publisher.transport().sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(decode_bundle(&sent[0]).content.is_empty());
    }

    #[test]
    fn repeated_publish_is_identical() {
        let publisher = GridOscPublisher::with_transport(RecordingTransport::default(), "test");
        publisher.publish(&[cell(1, 2)]).unwrap();
        publisher.publish(&[cell(1, 2)]).unwrap();

        let sent = publisher.transport().sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], sent[1]);
    }

    #[test]
    fn encoding_failure_sends_nothing() {
        let publisher = GridOscPublisher::with_transport(RecordingTransport::default(), "test");
        let mut bad = cell(1, 1);
        bad.dominant_color[2] = CellValue::Int(i64::MAX);

        let err = publisher.publish(&[cell(0, 0), bad]).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
        assert!(publisher.transport().sent.lock().unwrap().is_empty());
    }

    #[test]
    fn send_failure_propagates() {
        let publisher = GridOscPublisher::with_transport(FailingTransport, "test");
        match publisher.publish(&[cell(0, 0)]) {
            Err(Error::Transmission(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionRefused),
            other => panic!("expected transmission error, got {:?}", other.err()),
        }
    }

    #[test]
    fn empty_host_is_configuration_error() {
        let err = GridOscPublisher::new(&OscConfig::new("", 9000)).err().unwrap();
        assert!(matches!(err, Error::Configuration(_)));
        let err = GridOscPublisher::new(&OscConfig::new("   ", 9000)).err().unwrap();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn zero_port_is_configuration_error() {
        let err = GridOscPublisher::new(&OscConfig::new("127.0.0.1", 0)).err().unwrap();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn unresolvable_host_is_configuration_error() {
        let err = GridOscPublisher::new(&OscConfig::new("no such host.invalid", 9000)).err().unwrap();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn construction_does_not_need_a_listener() {
        let publisher = GridOscPublisher::new(&OscConfig::new("127.0.0.1", 9)).unwrap();
        assert_eq!(publisher.target_addr(), "127.0.0.1:9");
        assert!(publisher.transport().local_addr().unwrap().port() != 0);
        assert_eq!(publisher.transport().target(), "127.0.0.1:9".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn unroutable_destination_still_constructs() {
        // TEST-NET-1 is never routed; binding must not look the route up
        let publisher = GridOscPublisher::new(&OscConfig::new("192.0.2.1", 9000)).unwrap();
        assert_eq!(publisher.target_addr(), "192.0.2.1:9000");
    }
}
