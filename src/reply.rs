//! Representacion de la respuesta a un comando tal y como la consume el
//! renderer.

use bytes::Bytes;

/// La respuesta decodificada de un comando.
///
/// Se produce por cada comando enviado, se pinta inmediatamente y se
/// descarta.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Integer(i64),
    Text(String),
    Bytes(Bytes),
    Null,
    /// Error devuelto por el servidor dentro de un intercambio correcto.
    Error(String),
    List(Vec<Reply>),
    /// Cualquier otra forma de respuesta. Contiene una descripcion de
    /// depuracion de lo que se recibio.
    Unsupported(String),
}

impl From<redis::Value> for Reply {
    fn from(value: redis::Value) -> Reply {
        use redis::Value;

        match value {
            Value::Nil => Reply::Null,
            Value::Int(num) => Reply::Integer(num),
            Value::BulkString(data) => Reply::Bytes(Bytes::from(data)),
            Value::SimpleString(s) => Reply::Text(s),
            Value::Okay => Reply::Text("OK".to_string()),
            Value::VerbatimString { text, .. } => Reply::Text(text),
            // Los sets de RESP3 se tratan igual que un array.
            Value::Array(items) | Value::Set(items) => {
                Reply::List(items.into_iter().map(Reply::from).collect())
            }
            Value::ServerError(err) => Reply::Error(redis::RedisError::from(err).to_string()),
            // Map, Double, Boolean, Push, Attribute...
            other => Reply::Unsupported(format!("{:?}", other)),
        }
    }
}
