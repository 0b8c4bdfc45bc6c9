//! # Domain Types
//!
//! Core domain types for the tienda backend, plus the request payloads the
//! repositories accept. Serialized field names are the canonical wire and
//! document names, so these derive both `Serialize` and `Deserialize` and
//! are persisted as-is.
//!
//! ## Identity
//! Every entity carries a sequential integer `id` assigned by its
//! repository: `max(existing ids) + 1`, starting at 1 for productos and
//! usuarios and at [`crate::VENTA_ID_BASE`] for ventas.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Producto
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    /// Sequential identifier, unique within the catalog.
    pub id: u32,

    /// Display name.
    pub nombre: String,

    /// Brand name; searched together with `nombre`.
    pub marca: String,

    /// Free-form category label.
    pub categoria: String,

    /// Unit price. Invariant: `precio >= 0`.
    pub precio: f64,

    /// Sellable units on hand. Invariant: `stock >= 0` at all times.
    pub stock: i64,

    /// Whether the product is offered for sale.
    pub disponible: bool,

    /// Optional long description, empty string when not provided.
    pub desc: String,

    /// Image URL or path, empty string when not provided.
    pub imagen: String,
}

/// Payload for creating a product.
///
/// `nombre`, `marca`, `categoria` and `precio` are required (empty strings
/// count as missing); the rest fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NuevoProducto {
    pub nombre: Option<String>,
    pub marca: Option<String>,
    pub categoria: Option<String>,
    pub precio: Option<f64>,
    pub stock: Option<i64>,
    pub disponible: Option<bool>,
    pub desc: Option<String>,
    pub imagen: Option<String>,
}

/// Partial update for a product. Only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductoUpdate {
    pub nombre: Option<String>,
    pub marca: Option<String>,
    pub categoria: Option<String>,
    pub precio: Option<f64>,
    pub stock: Option<i64>,
    pub disponible: Option<bool>,
    pub desc: Option<String>,
    pub imagen: Option<String>,
}

// =============================================================================
// Usuario
// =============================================================================

/// A registered user, as persisted.
///
/// The credential field never leaves the storage layer: every outward-facing
/// operation returns [`UsuarioPublico`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    pub id: u32,
    pub nombre: String,
    pub apellido: String,
    /// Unique across the collection, enforced at creation time only.
    pub email: String,
    /// Sensitive. Serialized as `contraseña` in the persisted document.
    #[serde(rename = "contraseña")]
    pub contrasena: String,
    #[serde(default)]
    pub telefono: String,
    /// Opaque values owned by the caller; never interpreted here.
    #[serde(default)]
    pub mascotas: Vec<Value>,
}

/// Outward-facing projection of a [`Usuario`] with the credential removed.
///
/// Constructing this type is the redaction step: it has no credential field,
/// so no serialization path can leak one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsuarioPublico {
    pub id: u32,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub mascotas: Vec<Value>,
}

impl From<Usuario> for UsuarioPublico {
    fn from(u: Usuario) -> Self {
        UsuarioPublico {
            id: u.id,
            nombre: u.nombre,
            apellido: u.apellido,
            email: u.email,
            telefono: u.telefono,
            mascotas: u.mascotas,
        }
    }
}

/// Payload for creating a user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NuevoUsuario {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "contraseña")]
    pub contrasena: Option<String>,
    pub telefono: Option<String>,
    pub mascotas: Option<Vec<Value>>,
}

/// Partial update for a user. The credential is not updatable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsuarioUpdate {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub mascotas: Option<Vec<Value>>,
}

/// Login payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credenciales {
    pub email: Option<String>,
    #[serde(rename = "contraseña")]
    pub contrasena: Option<String>,
}

// =============================================================================
// Venta
// =============================================================================

/// A completed sale.
///
/// `fecha`, `productos` and `total` are immutable after creation; only
/// `direccion` and `metodo_pago` accept updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venta {
    pub id: u32,
    /// User that placed the sale. Validated at creation, not re-validated
    /// afterwards.
    pub id_usuario: u32,
    /// Creation timestamp, `DD-MM-YYYY, HH:mm:ss` local time.
    pub fecha: String,
    pub direccion: String,
    pub metodo_pago: String,
    /// Line items, snapshotted at creation time.
    pub productos: Vec<VentaLinea>,
    /// Fixed at 0.0; kept for document compatibility.
    pub costo_envio: f64,
    /// Sum of line subtotals, rounded to 2 decimals.
    pub total: f64,
}

impl Venta {
    /// True when any line item references the given product id.
    pub fn contiene_producto(&self, id: u32) -> bool {
        self.productos.iter().any(|l| l.id == id)
    }
}

/// One sale line: an immutable snapshot of a product at sale time.
///
/// `id` is a plain product reference, not a live link; later edits to the
/// product do not affect past sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentaLinea {
    pub id: u32,
    pub nombre: String,
    pub precio_unitario: f64,
    pub cantidad: i64,
    pub subtotal: f64,
}

/// Payload for creating a sale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NuevaVenta {
    pub id_usuario: Option<u32>,
    pub direccion: Option<String>,
    pub metodo_pago: Option<String>,
    pub productos: Option<Vec<LineaPedido>>,
}

/// One requested line in a [`NuevaVenta`].
#[derive(Debug, Clone, Deserialize)]
pub struct LineaPedido {
    pub id: u32,
    pub cantidad: i64,
}

/// Partial update for a sale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VentaUpdate {
    pub direccion: Option<String>,
    pub metodo_pago: Option<String>,
}

/// Search criteria for sales. Every field is independently optional and all
/// supplied criteria are ANDed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VentaCriteria {
    pub id_usuario: Option<u32>,
    /// Inclusive lower bound, `DD-MM-YYYY`; time of day is ignored.
    pub fecha_desde: Option<String>,
    /// Inclusive upper bound, `DD-MM-YYYY`; time of day is ignored.
    pub fecha_hasta: Option<String>,
    pub id_producto: Option<u32>,
}

/// One page of the ventas listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VentasPage {
    pub total: usize,
    pub offset: usize,
    /// Size of the returned slice, not the requested limit.
    pub limit: usize,
    pub data: Vec<Venta>,
}

// =============================================================================
// Id Assignment
// =============================================================================

/// Next sequential id for a collection: `max + 1`, or `base` when empty.
pub fn next_id<I>(ids: I, base: u32) -> u32
where
    I: Iterator<Item = u32>,
{
    ids.max().map_or(base, |max| max + 1)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VENTA_ID_BASE;

    #[test]
    fn test_next_id_empty_collection() {
        assert_eq!(next_id(std::iter::empty(), 1), 1);
        assert_eq!(next_id(std::iter::empty(), VENTA_ID_BASE), 4001);
    }

    #[test]
    fn test_next_id_takes_max_plus_one() {
        // Order-irrelevant: collections are flat sets keyed by id.
        assert_eq!(next_id([3u32, 1, 2].into_iter(), 1), 4);
        assert_eq!(next_id([4003u32, 4001].into_iter(), VENTA_ID_BASE), 4004);
    }

    #[test]
    fn test_usuario_publico_drops_credential() {
        let usuario = Usuario {
            id: 1,
            nombre: "Ana".into(),
            apellido: "García".into(),
            email: "ana@example.com".into(),
            contrasena: "secreta".into(),
            telefono: "555-0100".into(),
            mascotas: vec![],
        };

        let publico = UsuarioPublico::from(usuario);
        let json = serde_json::to_value(&publico).unwrap();
        assert!(json.get("contraseña").is_none());
        assert_eq!(json["email"], "ana@example.com");
    }

    #[test]
    fn test_usuario_roundtrip_preserves_credential_name() {
        let doc = serde_json::json!({
            "id": 2,
            "nombre": "Luis",
            "apellido": "Pérez",
            "email": "luis@example.com",
            "contraseña": "1234",
            "telefono": "",
            "mascotas": [{"nombre": "Firulais", "tipo": "perro"}]
        });

        let usuario: Usuario = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(usuario.contrasena, "1234");
        assert_eq!(serde_json::to_value(&usuario).unwrap(), doc);
    }

    #[test]
    fn test_contiene_producto() {
        let venta = Venta {
            id: 4001,
            id_usuario: 1,
            fecha: "01-01-2024, 10:00:00".into(),
            direccion: "Calle Falsa 123".into(),
            metodo_pago: "tarjeta".into(),
            productos: vec![VentaLinea {
                id: 7,
                nombre: "Correa".into(),
                precio_unitario: 10.0,
                cantidad: 1,
                subtotal: 10.0,
            }],
            costo_envio: 0.0,
            total: 10.0,
        };

        assert!(venta.contiene_producto(7));
        assert!(!venta.contiene_producto(8));
    }
}
