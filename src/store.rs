use crate::Reply;

/// Capacidades que el bucle de comandos necesita del cliente del servidor.
///
/// El dispatcher y la sesion solo dependen de este trait, de forma que
/// cualquier implementacion (el `BlockingClient` real o un doble en los
/// tests) es intercambiable.
pub trait Store {
    /// Comprueba que el servidor responde.
    fn ping(&mut self) -> crate::Result<()>;

    /// Ejecuta un comando. `args[0]` es el nombre del comando y el resto
    /// sus argumentos, sin ninguna distincion a este nivel.
    fn execute(&mut self, args: &[String]) -> crate::Result<Reply>;
}
