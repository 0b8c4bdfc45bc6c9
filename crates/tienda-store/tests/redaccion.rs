//! Credential redaction property: no operation that emits a user record
//! may include the credential field, whatever the record contains and
//! whatever extra fields the caller smuggled into the payload.

use proptest::prelude::*;
use serde_json::{json, Value};

use tienda_core::{Credenciales, NuevoUsuario, UsuarioUpdate};
use tienda_store::{Database, StoreConfig};

/// Top-level keys a redacted user may legitimately carry.
const CLAVES_PUBLICAS: &[&str] = &["id", "nombre", "apellido", "email", "telefono", "mascotas"];

fn sin_credencial(valor: &Value) {
    let objeto = valor.as_object().expect("user record must be an object");
    assert!(
        objeto.get("contraseña").is_none(),
        "credential leaked: {valor}"
    );
    for clave in objeto.keys() {
        assert!(
            CLAVES_PUBLICAS.contains(&clave.as_str()),
            "unexpected key {clave} in {valor}"
        );
    }
}

proptest! {
    // Each case spins up a runtime and a temp store; keep the count modest.
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn ninguna_operacion_emite_la_credencial(
        nombre in "[A-Za-zñáéíóú]{1,12}",
        apellido in "[A-Za-zñáéíóú]{1,12}",
        usuario_email in "[a-z0-9]{1,10}",
        contrasena in "[!-~]{1,24}",
        telefono in "[0-9 +-]{0,12}",
        mascota in "[A-Za-z]{1,10}",
        clave_extra in "[a-z]{1,8}",
        valor_extra in "[ -~]{0,16}",
    ) {
        prop_assume!(!CLAVES_PUBLICAS.contains(&clave_extra.as_str()));
        prop_assume!(clave_extra != "contraseña");

        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let db = Database::new(StoreConfig::new(dir.path())).await.unwrap();
            let email = format!("{usuario_email}@example.com");

            // The payload arrives as arbitrary JSON: known fields plus an
            // extra one the schema never heard of.
            let mut payload = json!({
                "nombre": nombre,
                "apellido": apellido,
                "email": email,
                "contraseña": contrasena,
                "telefono": telefono,
                "mascotas": [{"nombre": mascota, "contraseña": "dato del caller"}],
            });
            payload
                .as_object_mut()
                .unwrap()
                .insert(clave_extra.clone(), Value::String(valor_extra.clone()));
            let nuevo: NuevoUsuario = serde_json::from_value(payload).unwrap();

            let creado = db.usuarios().create(nuevo).await.unwrap();
            sin_credencial(&serde_json::to_value(&creado).unwrap());

            let obtenido = db.usuarios().get(creado.id).await.unwrap();
            sin_credencial(&serde_json::to_value(&obtenido).unwrap());

            for usuario in db.usuarios().list().await.unwrap() {
                sin_credencial(&serde_json::to_value(&usuario).unwrap());
            }

            let autenticado = db
                .usuarios()
                .authenticate(Credenciales {
                    email: Some(email.clone()),
                    contrasena: Some(contrasena.clone()),
                })
                .await
                .unwrap();
            sin_credencial(&serde_json::to_value(&autenticado).unwrap());

            let actualizado = db
                .usuarios()
                .update(
                    creado.id,
                    UsuarioUpdate {
                        telefono: Some("555-0101".to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            sin_credencial(&serde_json::to_value(&actualizado).unwrap());

            let eliminado = db.usuarios().delete(creado.id).await.unwrap();
            sin_credencial(&serde_json::to_value(&eliminado).unwrap());
        });
    }
}
