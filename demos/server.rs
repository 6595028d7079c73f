use std::{fmt::Debug,
          net::UdpSocket,
          sync::{Arc, Barrier},
          thread::{self, JoinHandle}};

use coap_packet::{Code, OptNumber, Packet, TryFromBytes, TryIntoBytes, Type};

fn main() {
  let server_up = Arc::new(Barrier::new(2));
  let _server = spawn_server(server_up.clone());
  server_up.wait();

  let sock = UdpSocket::bind("0.0.0.0:55556").unwrap();
  sock.connect("0.0.0.0:5683").unwrap();
  println!("client: 🔌 connected to server");

  let bytes = loop {
    if let Ok(bytes) = sock.send(&get_hello().try_into_bytes().unwrap()) {
      break bytes;
    }
  };
  println!("client: 📨 sent GET /hello {} bytes", bytes);
  println!("client: 📭 waiting for response...");

  let mut buf = [0; 128];
  let n = sock.recv(&mut buf).unwrap();

  let rep = Packet::try_from_bytes(&buf[0..n]).unwrap();
  println!("client: 📨 received {} {}",
           rep.code,
           String::from_utf8(rep.payload.0.clone()).unwrap());
}

fn spawn_server(b: Arc<Barrier>) -> JoinHandle<()> {
  thread::spawn(move || {
    let result = || -> Result<(), Box<dyn Debug>> {
      fn err<T: Debug + 'static>(t: T) -> Box<dyn Debug> {
        Box::<_>::from(t)
      }
      let sock = UdpSocket::bind("0.0.0.0:5683").map_err(err)?;
      println!("server: 👂 listening at 0.0.0.0:5683/hello");

      b.wait();

      let mut buf = [0; 128];
      loop {
        let (n, addr) = sock.recv_from(&mut buf).map_err(err)?;
        if n == 0 {
          continue;
        }

        let bytes = &buf[0..n];

        let req = Packet::try_from_bytes(bytes).map_err(err)?;

        let method = match req.code.detail {
          | 1 => "GET",
          | 2 => "POST",
          | 3 => "PUT",
          | 4 => "DELETE",
          | _ => unreachable!(),
        };
        let path_opt = req.opts
                          .iter()
                          .find(|opt| opt.number == OptNumber::URI_PATH)
                          .ok_or_else(|| err("no Uri-Path"))?;
        let path = String::from_utf8(path_opt.value.0.clone()).map_err(err)?;

        let rep = match path.as_str() {
          | "hello" => ok_hello(&req),
          | _ => not_found(&req),
        };

        println!("server: 📨 got {} {}, sending {}", method, path, rep.code);

        sock.send_to(&rep.try_into_bytes().unwrap(), addr)
            .map_err(err)?;
      }
    }();

    if let Err(e) = result {
      eprintln!("server: 😞 error {:?}", e);
    }
  })
}

fn get_hello() -> Packet {
  Packet::builder().ty(Type::Con)
                   .id(1)
                   .path("hello")
                   .build()
                   .unwrap()
}

fn ok_hello(req: &Packet) -> Packet {
  Packet::builder().ty(Type::Ack)
                   .id(req.id.0)
                   .token(&req.token.0)
                   .code(Code::CONTENT)
                   .payload("hi there!")
                   .build()
                   .unwrap()
}

fn not_found(req: &Packet) -> Packet {
  Packet::builder().ty(Type::Ack)
                   .id(req.id.0)
                   .token(&req.token.0)
                   .code(Code::NOT_FOUND)
                   .payload("not found :(")
                   .build()
                   .unwrap()
}
