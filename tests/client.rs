use redish::cmd::handle_line;
use redish::config::TlsSettings;
use redish::{BlockingClient, ConnectionDescriptor, Reply};

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// Lee un comando (array de bulk strings) de la conexion.
fn read_command(reader: &mut BufReader<TcpStream>) -> Option<Vec<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line).ok()? == 0 {
        return None;
    }

    let len: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;
    let mut args = Vec::with_capacity(len);

    for _ in 0..len {
        line.clear();
        reader.read_line(&mut line).ok()?;
        let n: usize = line.trim_end().strip_prefix('$')?.parse().ok()?;

        let mut data = vec![0; n + 2];
        reader.read_exact(&mut data).ok()?;
        data.truncate(n);

        args.push(String::from_utf8(data).ok()?);
    }

    Some(args)
}

fn response(args: &[String]) -> &'static [u8] {
    match &args[0].to_uppercase()[..] {
        "PING" => b"+PONG\r\n",
        "CLIENT" => b"+OK\r\n",
        "GET" => b"$3\r\nbar\r\n",
        "INCR" => b":42\r\n",
        "LRANGE" => b"*3\r\n$1\r\na\r\n:1\r\n$-1\r\n",
        // Transaccion en la que falla el segundo comando.
        "EXEC" => b"*2\r\n+OK\r\n-ERR inner\r\n",
        _ => b"-ERR unknown command\r\n",
    }
}

/// Servidor minimo que atiende una unica conexion con respuestas fijas.
fn start_server() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    thread::spawn(move || {
        let (socket, _) = listener.accept().unwrap();
        let mut writer = socket.try_clone().unwrap();
        let mut reader = BufReader::new(socket);

        while let Some(args) = read_command(&mut reader) {
            if args.is_empty() || writer.write_all(response(&args)).is_err() {
                break;
            }
        }
    });

    port
}

fn descriptor(port: u16) -> ConnectionDescriptor {
    ConnectionDescriptor {
        host: "127.0.0.1".to_string(),
        port,
        db: 0,
        username: None,
        password: None,
        tls: None,
    }
}

fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

#[test]
fn ping_and_execute() {
    let port = start_server();
    let mut client = BlockingClient::connect(&descriptor(port)).unwrap();

    client.ping().unwrap();

    assert_eq!(
        client.execute(&args(&["GET", "foo"])).unwrap(),
        Reply::Bytes("bar".into())
    );
    assert_eq!(
        client.execute(&args(&["INCR", "counter"])).unwrap(),
        Reply::Integer(42)
    );
    assert_eq!(
        client.execute(&args(&["LRANGE", "l", "0", "-1"])).unwrap(),
        Reply::List(vec![Reply::Bytes("a".into()), Reply::Integer(1), Reply::Null])
    );
}

#[test]
fn server_error_is_a_reply() {
    let port = start_server();
    let mut client = BlockingClient::connect(&descriptor(port)).unwrap();

    match client.execute(&args(&["FOO"])).unwrap() {
        Reply::Error(msg) => assert!(msg.contains("unknown command"), "{}", msg),
        reply => panic!("unexpected reply {:?}", reply),
    }
}

#[test]
fn error_inside_a_list_keeps_the_other_elements() {
    let port = start_server();
    let mut client = BlockingClient::connect(&descriptor(port)).unwrap();

    match client.execute(&args(&["EXEC"])).unwrap() {
        Reply::List(items) => {
            assert_eq!(items.len(), 2);
            assert_eq!(items[0], Reply::Text("OK".to_string()));
            assert!(
                matches!(&items[1], Reply::Error(msg) if msg.contains("inner")),
                "{:?}",
                items[1]
            );
        }
        reply => panic!("unexpected reply {:?}", reply),
    }
}

#[test]
fn error_replies_print_nothing() {
    let port = start_server();
    let mut client = BlockingClient::connect(&descriptor(port)).unwrap();
    let mut out = Vec::new();

    handle_line(&mut client, "EXEC", &mut out);
    handle_line(&mut client, "FOO bar", &mut out);

    assert_eq!(String::from_utf8(out).unwrap(), "OK\n");
}

/// Destino del log compartido con el test.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn only_the_command_name_is_logged() {
    let port = start_server();
    let mut client = BlockingClient::connect(&descriptor(port)).unwrap();

    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        client.execute(&args(&["AUTH", "admin", "hunter2"])).unwrap();
    });

    let log = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(log.contains("AUTH"), "{}", log);
    assert!(!log.contains("hunter2"), "{}", log);
}

#[test]
fn empty_command_is_rejected() {
    let port = start_server();
    let mut client = BlockingClient::connect(&descriptor(port)).unwrap();

    assert!(client.execute(&[]).is_err());
}

#[test]
fn connect_to_closed_port_fails() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    assert!(BlockingClient::connect(&descriptor(port)).is_err());
}

#[test]
fn tls_descriptor_builds_tls_address() {
    let mut descriptor = descriptor(6380);
    descriptor.tls = Some(TlsSettings { insecure: true });

    let info = descriptor.to_connection_info();
    assert!(matches!(
        info.addr,
        redis::ConnectionAddr::TcpTls { ref host, port: 6380, insecure: true, .. } if host == "127.0.0.1"
    ));
}

#[tokio::test]
async fn async_client() {
    let port = start_server();
    let mut client = redish::client::connect(&descriptor(port)).await.unwrap();

    client.ping().await.unwrap();
    assert_eq!(
        client.execute(&args(&["GET", "k"])).await.unwrap(),
        Reply::Bytes("bar".into())
    );
}
