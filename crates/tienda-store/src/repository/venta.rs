//! # Venta Repository
//!
//! Sale operations. This is the only repository that reads and writes more
//! than one collection per operation, and the only one whose commits span
//! two documents (ventas + productos). Both multi-document writes go
//! through the store's stage/commit protocol so a failure can never leave
//! one document updated and the other not.
//!
//! ## Create Protocol
//!
//! Creation is strictly validate-then-commit: every requested line is
//! checked (product exists, quantity positive, stock sufficient) before any
//! stock is decremented or any line snapshotted. A validation failure
//! leaves both collections byte-for-byte unchanged.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::{Collection, Database};
use tienda_core::validation::{texto_requerido, validar_cantidad};
use tienda_core::{
    fecha, money, next_id, CoreError, NuevaVenta, Producto, Usuario, ValidationError, Venta,
    VentaCriteria, VentaLinea, VentaUpdate, VentasPage, VENTA_ID_BASE,
};

/// Field list echoed in the required-fields validation message.
const CAMPOS_REQUERIDOS: &str = "id_usuario, direccion, metodo_pago y productos[]";

/// Repository for sale operations.
#[derive(Debug, Clone)]
pub struct VentaRepository {
    db: Database,
}

impl VentaRepository {
    pub fn new(db: Database) -> Self {
        VentaRepository { db }
    }

    /// Returns one page of sales.
    ///
    /// `offset` and `limit` default to 0 and the collection length; negative
    /// values clamp to 0. The returned `limit` is the size of the actual
    /// slice, not the requested one.
    pub async fn list(&self, offset: Option<i64>, limit: Option<i64>) -> StoreResult<VentasPage> {
        let ventas: Vec<Venta> = self.db.store().read(Collection::Ventas).await?;

        let total = ventas.len();
        let offset = offset.unwrap_or(0).max(0) as usize;
        let limit = limit.unwrap_or(total as i64).max(0) as usize;
        let data: Vec<Venta> = ventas.into_iter().skip(offset).take(limit).collect();

        Ok(VentasPage {
            total,
            offset,
            limit: data.len(),
            data,
        })
    }

    /// Returns one sale by id.
    pub async fn get(&self, id: u32) -> StoreResult<Venta> {
        let ventas: Vec<Venta> = self.db.store().read(Collection::Ventas).await?;
        ventas
            .into_iter()
            .find(|v| v.id == id)
            .ok_or_else(|| CoreError::VentaNoEncontrada { id }.into())
    }

    /// Creates a sale, decrementing catalog stock atomically with it.
    pub async fn create(&self, pedido: NuevaVenta) -> StoreResult<Venta> {
        debug!(?pedido, "create venta");

        let direccion = texto_requerido(pedido.direccion);
        let metodo_pago = texto_requerido(pedido.metodo_pago);
        let (Some(id_usuario), Some(direccion), Some(metodo_pago), Some(lineas)) =
            (pedido.id_usuario, direccion, metodo_pago, pedido.productos)
        else {
            return Err(ValidationError::Requeridos {
                fields: CAMPOS_REQUERIDOS,
            }
            .into());
        };
        if lineas.is_empty() {
            return Err(ValidationError::Requeridos {
                fields: CAMPOS_REQUERIDOS,
            }
            .into());
        }

        // Exclusive intent on all three collections for the whole
        // read-validate-commit sequence. Canonical order.
        let _productos_guard = self.db.lock_productos().await;
        let _usuarios_guard = self.db.lock_usuarios().await;
        let _ventas_guard = self.db.lock_ventas().await;

        let usuarios: Vec<Usuario> = self.db.store().read(Collection::Usuarios).await?;
        if !usuarios.iter().any(|u| u.id == id_usuario) {
            return Err(ValidationError::IdUsuarioInvalido.into());
        }

        let mut catalogo: Vec<Producto> = self.db.store().read(Collection::Productos).await?;
        let mut ventas: Vec<Venta> = self.db.store().read(Collection::Ventas).await?;

        // Validation pass. Quantities are accumulated per product so a
        // request that names the same product twice is checked against the
        // combined amount; otherwise two lines of 3 against a stock of 5
        // would each validate and drive the stock negative.
        let mut solicitado: HashMap<u32, i64> = HashMap::new();
        let mut detalle: Vec<VentaLinea> = Vec::with_capacity(lineas.len());
        for linea in &lineas {
            let Some(producto) = catalogo.iter().find(|p| p.id == linea.id) else {
                return Err(ValidationError::ProductoInexistente { id: linea.id }.into());
            };
            validar_cantidad(linea.id, linea.cantidad)?;

            let acumulado = solicitado.entry(linea.id).or_insert(0);
            *acumulado += linea.cantidad;
            if producto.stock < *acumulado {
                warn!(
                    id = producto.id,
                    disponible = producto.stock,
                    solicitado = *acumulado,
                    "Stock insuficiente"
                );
                return Err(StoreError::Core(CoreError::StockInsuficiente {
                    nombre: producto.nombre.clone(),
                    disponible: producto.stock,
                    solicitado: *acumulado,
                }));
            }

            detalle.push(VentaLinea {
                id: producto.id,
                nombre: producto.nombre.clone(),
                precio_unitario: producto.precio,
                cantidad: linea.cantidad,
                subtotal: money::subtotal(producto.precio, linea.cantidad),
            });
        }

        // Commit pass. Nothing above mutated either collection.
        for linea in &detalle {
            if let Some(producto) = catalogo.iter_mut().find(|p| p.id == linea.id) {
                producto.stock -= linea.cantidad;
            }
        }

        let total = money::total(&detalle);
        let venta = Venta {
            id: next_id(ventas.iter().map(|v| v.id), VENTA_ID_BASE),
            id_usuario,
            fecha: fecha::timestamp_ahora(),
            direccion,
            metodo_pago,
            productos: detalle,
            costo_envio: 0.0,
            total,
        };
        ventas.push(venta.clone());

        let staged = vec![
            self.db.store().stage(Collection::Ventas, &ventas).await?,
            self.db
                .store()
                .stage(Collection::Productos, &catalogo)
                .await?,
        ];
        self.db.store().commit(staged).await?;

        info!(
            id = venta.id,
            id_usuario,
            total = venta.total,
            lineas = venta.productos.len(),
            "Venta creada"
        );
        Ok(venta)
    }

    /// Multi-criteria search. All supplied criteria are ANDed.
    ///
    /// Date bounds are inclusive and date-only: the time component of the
    /// stored timestamp never participates. A malformed bound is rejected
    /// up front; a stored sale whose timestamp no longer parses simply
    /// falls outside every date filter. An empty result is the NoMatch
    /// outcome, surfaced by the caller.
    pub async fn search(&self, criteria: VentaCriteria) -> StoreResult<Vec<Venta>> {
        let desde = match criteria.fecha_desde.as_deref().filter(|v| !v.is_empty()) {
            Some(valor) => Some(fecha::parse_fecha(valor).ok_or_else(|| {
                ValidationError::FechaInvalida {
                    valor: valor.to_string(),
                }
            })?),
            None => None,
        };
        let hasta = match criteria.fecha_hasta.as_deref().filter(|v| !v.is_empty()) {
            Some(valor) => Some(fecha::parse_fecha(valor).ok_or_else(|| {
                ValidationError::FechaInvalida {
                    valor: valor.to_string(),
                }
            })?),
            None => None,
        };

        let ventas: Vec<Venta> = self.db.store().read(Collection::Ventas).await?;
        let resultados: Vec<Venta> = ventas
            .into_iter()
            .filter(|v| {
                if let Some(id) = criteria.id_usuario {
                    if v.id_usuario != id {
                        return false;
                    }
                }
                if desde.is_some() || hasta.is_some() {
                    let Some(dia) = fecha::parse_fecha(&v.fecha) else {
                        return false;
                    };
                    if desde.is_some_and(|d| dia < d) {
                        return false;
                    }
                    if hasta.is_some_and(|h| dia > h) {
                        return false;
                    }
                }
                if let Some(id) = criteria.id_producto {
                    if !v.contiene_producto(id) {
                        return false;
                    }
                }
                true
            })
            .collect();

        debug!(resultados = resultados.len(), "Búsqueda de ventas");
        Ok(resultados)
    }

    /// Applies a partial update. Only `direccion` and `metodo_pago` are
    /// mutable; the timestamp, line items and total never change after
    /// creation.
    pub async fn update(&self, id: u32, cambios: VentaUpdate) -> StoreResult<Venta> {
        debug!(id, ?cambios, "update venta");

        let _ventas_guard = self.db.lock_ventas().await;

        let mut ventas: Vec<Venta> = self.db.store().read(Collection::Ventas).await?;
        let Some(venta) = ventas.iter_mut().find(|v| v.id == id) else {
            return Err(CoreError::VentaNoEncontrada { id }.into());
        };

        if let Some(direccion) = cambios.direccion {
            venta.direccion = direccion;
        }
        if let Some(metodo_pago) = cambios.metodo_pago {
            venta.metodo_pago = metodo_pago;
        }

        let actualizada = venta.clone();
        self.db.store().write(Collection::Ventas, &ventas).await?;

        info!(id, "Venta actualizada");
        Ok(actualizada)
    }

    /// Deletes a sale and restores its quantities onto the catalog.
    ///
    /// Restoration is best-effort per line: a product that no longer exists
    /// is skipped silently. Both documents are committed together.
    pub async fn delete(&self, id: u32) -> StoreResult<Venta> {
        debug!(id, "delete venta");

        let _productos_guard = self.db.lock_productos().await;
        let _ventas_guard = self.db.lock_ventas().await;

        let mut ventas: Vec<Venta> = self.db.store().read(Collection::Ventas).await?;
        let Some(posicion) = ventas.iter().position(|v| v.id == id) else {
            return Err(CoreError::VentaNoEncontrada { id }.into());
        };
        let mut catalogo: Vec<Producto> = self.db.store().read(Collection::Productos).await?;

        let borrada = ventas.remove(posicion);
        for linea in &borrada.productos {
            match catalogo.iter_mut().find(|p| p.id == linea.id) {
                Some(producto) => producto.stock += linea.cantidad,
                None => debug!(
                    id_producto = linea.id,
                    "Producto ya no existe, no se repone stock"
                ),
            }
        }

        let staged = vec![
            self.db.store().stage(Collection::Ventas, &ventas).await?,
            self.db
                .store()
                .stage(Collection::Productos, &catalogo)
                .await?,
        ];
        self.db.store().commit(staged).await?;

        info!(id, "Venta eliminada");
        Ok(borrada)
    }
}
