use std::env;
use std::net::UdpSocket;
use rosc::{OscPacket, decoder};

fn print_packet(packet: &OscPacket, indent: usize) {
    let pad = " ".repeat(indent);
    match packet {
        OscPacket::Message(msg) => {
            let args: Vec<String> = msg.args.iter().map(|a| format!("{:?}", a)).collect();
            println!("{}{} {}", pad, msg.addr, args.join(" "));
        }
        OscPacket::Bundle(bundle) => {
            println!("{}Bundle with {} elements", pad, bundle.content.len());
            for inner in &bundle.content {
                print_packet(inner, indent + 2);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bind_addr = env::args().nth(1).unwrap_or_else(|| "127.0.0.1:9000".to_string());
    println!("Simple OSC Receiver - listening on {}", bind_addr);
    println!("Start webcam-osc with the same host/port and paste a frame");

    let socket = UdpSocket::bind(&bind_addr)?;
    let mut buf = [0u8; rosc::decoder::MTU];

    loop {
        match socket.recv_from(&mut buf) {
            Ok((size, addr)) => {
                println!("Received {} bytes from {}", size, addr);
                match decoder::decode_udp(&buf[..size]) {
                    Ok((_, packet)) => print_packet(&packet, 2),
                    Err(e) => eprintln!("  Failed to decode OSC: {}", e),
                }
            }
            Err(e) => {
                eprintln!("Failed to receive: {}", e);
            }
        }
    }
}
