//! Integration tests for `ApiClient` using wiremock HTTP mocks.

use consultavd_client::{
    ApiClient, ClientError, Entity, ExportFormat, FieldSearch, NewTemplate, SearchExport,
    StoreFilters, TableQuery, TemplateKind,
};
use consultavd_core::{AppConfig, Environment, Record};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, 30).expect("client construction should not fail")
}

#[tokio::test]
async fn search_stores_returns_candidates() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "success": true,
        "data": [
            {
                "id": 1501,
                "codigo": "P1501",
                "nome": "VD SHOPPING ELDORADO",
                "endereco": "AV REBOUCAS 3970",
                "cidade": "SAO PAULO",
                "uf": "SP",
                "status": "ATIVA"
            },
            { "id": "1502", "codigo": null, "nome": "VD ELDORADO II" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/search/lojas"))
        .and(query_param("q", "eldorado"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let stores = client
        .search_stores("eldorado")
        .await
        .expect("should parse candidates");

    assert_eq!(stores.len(), 2);
    assert_eq!(stores[0].id, "1501");
    assert_eq!(stores[0].code.as_deref(), Some("P1501"));
    assert_eq!(stores[1].id, "1502");
    assert!(stores[1].code.is_none());
}

#[tokio::test]
async fn get_carriers_encodes_store_id_and_skips_nulls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/lojas/P%2010/operadoras"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": ["CLARO", null, "VIVO"]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let carriers = client.get_carriers("P 10").await.expect("should parse");
    assert_eq!(carriers, vec!["CLARO", "VIVO"]);
}

#[tokio::test]
async fn get_circuits_uses_nested_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/lojas/1501/operadoras/VIVO/circuitos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": ["SPO-IP-00123", "SPO-IP-00456"]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let circuits = client
        .get_circuits("1501", "VIVO")
        .await
        .expect("should parse");
    assert_eq!(circuits, vec!["SPO-IP-00123", "SPO-IP-00456"]);
}

#[tokio::test]
async fn triple_search_sends_all_three_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/loja-operadora-circuito"))
        .and(query_param("loja_id", "1501"))
        .and(query_param("operadora", "VIVO"))
        .and(query_param("circuito", "SPO-IP-00123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "lojas": [{ "loja_id": 1501, "LOJAS": "VD SHOPPING ELDORADO", "STATUS": "ATIVA" }],
                "circuitos": [{ "circuito": "SPO-IP-00123", "operadora": "VIVO" }]
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .search_by_store_carrier_circuit("1501", "VIVO", "SPO-IP-00123")
        .await
        .expect("should parse search result");

    assert_eq!(result.stores.len(), 1);
    assert_eq!(result.stores[0].name(), "VD SHOPPING ELDORADO");
    assert_eq!(result.circuits.len(), 1);
    assert!(result.inventory.is_empty());
}

#[tokio::test]
async fn field_search_uses_endpoint_specific_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/id-vivo"))
        .and(query_param("id_vivo", "998877"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "lojas": [], "circuitos": [], "inventario": [{ "ID_VIVO": "998877" }] }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .search_by_field(FieldSearch::VivoId, "998877")
        .await
        .expect("should parse");
    assert_eq!(result.inventory.len(), 1);
}

#[tokio::test]
async fn unsuccessful_envelope_becomes_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/unified"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error": "Termo de busca vazio"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.unified_search("").await.unwrap_err();
    assert!(
        matches!(err, ClientError::Api(ref msg) if msg == "Termo de busca vazio"),
        "expected Api error, got: {err:?}"
    );
}

#[tokio::test]
async fn non_2xx_status_carries_backend_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sql/execute"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "detail": "Apenas SELECT permitido" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.execute_sql("DELETE FROM lojas").await.unwrap_err();
    match err {
        ClientError::UnexpectedStatus { status, detail, .. } => {
            assert_eq!(status, 400);
            assert_eq!(detail.as_deref(), Some("Apenas SELECT permitido"));
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.health().await.unwrap_err();
    assert!(
        matches!(err, ClientError::Deserialize { ref context, .. } if context == "health"),
        "expected Deserialize error, got: {err:?}"
    );
}

#[tokio::test]
async fn list_stores_sends_paging_and_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/lojas"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "50"))
        .and(query_param("uf", "RJ"))
        .and(query_param("search", "barra"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [{ "CODIGO": 77, "LOJAS": "VD BARRA", "UF": "RJ" }],
            "pagination": { "page": 2, "limit": 50, "total": 51 }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let filters = StoreFilters {
        uf: Some("RJ".into()),
        search: Some("barra".into()),
        ..StoreFilters::default()
    };
    let page = client
        .list_stores(&filters, 2, 50)
        .await
        .expect("should parse page");

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].code(), "77");
    assert_eq!(page.info.total, 51);
    assert_eq!(page.info.page_count(), 2);
}

#[tokio::test]
async fn audit_logs_decode_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/audit/logs"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [{
                "id": 1,
                "timestamp": "2024-05-02T14:30:00",
                "user": "admin",
                "action": "UPDATE",
                "table": "lojas_lojas",
                "record_id": 1501,
                "old_value": { "STATUS": "ATIVA" },
                "new_value": { "STATUS": "INATIVA" }
            }],
            "pagination": { "page": 1, "limit": 50, "total": 1, "pages": 1 }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client.audit_logs(1, 50).await.expect("should parse");
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].summary(), "UPDATE em lojas_lojas");
    assert_eq!(page.items[0].changed_fields(), vec!["STATUS".to_owned()]);
}

#[tokio::test]
async fn cache_stats_and_clear() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cache/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "hits": 120, "misses": 30, "hit_rate": 80.0, "enabled": true }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/cache/clear"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Cache limpo com sucesso"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let stats = client.cache_stats().await.expect("should parse stats");
    assert_eq!(stats.hits, 120);
    assert!(stats.enabled);

    let message = client.clear_cache().await.expect("should clear");
    assert_eq!(message.as_deref(), Some("Cache limpo com sucesso"));
}

#[tokio::test]
async fn templates_roundtrip_through_backend() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/templates"))
        .and(query_param("tipo", "alerta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 4,
                "tipo": "alerta",
                "nome": "Queda de link",
                "conteudo": { "texto": "Circuito {circuito} fora" },
                "criado_em": "2024-05-01T10:00:00"
            }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/templates"))
        .and(body_json(serde_json::json!({
            "tipo": "informativo",
            "nome": "Manutenção",
            "conteudo": { "texto": "Janela programada" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 5,
            "tipo": "informativo",
            "nome": "Manutenção",
            "conteudo": { "texto": "Janela programada" },
            "criado_em": "2024-05-02T09:00:00"
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/templates/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Template removido"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let alerts = client
        .templates(Some(TemplateKind::Alerta))
        .await
        .expect("should list");
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].nome, "Queda de link");

    let created = client
        .create_template(&NewTemplate {
            tipo: TemplateKind::Informativo,
            nome: "Manutenção".to_owned(),
            conteudo: serde_json::json!({ "texto": "Janela programada" }),
        })
        .await
        .expect("should create");
    assert_eq!(created.id, 5);

    client.delete_template(5).await.expect("should delete");
}

#[tokio::test]
async fn deleting_missing_template_is_404() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/templates/99"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "detail": "Template não encontrado" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.delete_template(99).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::UnexpectedStatus { status: 404, .. }
    ));
}

#[tokio::test]
async fn sql_console_returns_columns_and_rows() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sql/execute"))
        .and(body_json(serde_json::json!({ "query": "SELECT UF FROM lojas_lojas" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "columns": ["UF"],
            "data": [{ "UF": "SP" }, { "UF": "RJ" }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .execute_sql("SELECT UF FROM lojas_lojas")
        .await
        .expect("should run");
    assert_eq!(result.columns, vec!["UF"]);
    assert_eq!(result.data.len(), 2);
}

#[tokio::test]
async fn from_config_sends_bearer_token_and_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .and(header("authorization", "Bearer s3cret"))
        .and(header("user-agent", "consultavd-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "timestamp": "2024-05-02T14:30:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = AppConfig {
        env: Environment::Test,
        api_url: server.uri(),
        api_token: Some("s3cret".to_owned()),
        log_level: "debug".to_owned(),
        request_timeout_secs: 5,
        user_agent: "consultavd-test".to_owned(),
        store_search_debounce_ms: 300,
        store_search_min_chars: 2,
        page_size: 20,
    };

    let client = ApiClient::from_config(&config).expect("client");
    let health = client.health().await.expect("should be healthy");
    assert_eq!(health.status, "healthy");
}

fn record(value: serde_json::Value) -> Record {
    Record::from_value(value).expect("object literal")
}

#[tokio::test]
async fn dashboard_stats_decode_count_maps() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "total_lojas": 320,
                "lojas_por_status": { "ATIVA": 300, "INATIVA": 20 },
                "total_circuitos": 910,
                "circuitos_por_operadora": { "VIVO": 600, "OI": 310 },
                "lojas_por_uf": { "SP": 200, "RJ": 120 }
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let stats = client.dashboard_stats().await.expect("should parse stats");
    assert_eq!(stats.total_lojas, 320);
    assert_eq!(stats.total_circuitos, 910);
    assert_eq!(stats.lojas_por_status.get("INATIVA"), Some(&20));
    assert_eq!(stats.lojas_por_uf.len(), 2);
}

#[tokio::test]
async fn store_by_id_missing_is_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/lojas/9999"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "detail": "Loja não encontrada" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.store(9999).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::UnexpectedStatus { status: 404, detail: Some(ref d), .. }
            if d == "Loja não encontrada"
    ));
}

#[tokio::test]
async fn create_record_posts_fields_and_returns_row() {
    let server = MockServer::start().await;
    let fields = serde_json::json!({
        "nome": "VD NOVA",
        "endereco": "RUA A 10",
        "cidade": "CAMPINAS",
        "uf": "SP"
    });

    Mock::given(method("POST"))
        .and(path("/api/lojas"))
        .and(body_json(&fields))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "id": 88, "nome": "VD NOVA", "cidade": "CAMPINAS", "status": "ATIVA" },
            "message": "Loja criada com sucesso"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let created = client
        .create_record(Entity::Stores, &record(fields))
        .await
        .expect("should create");
    assert_eq!(created.get("id"), Some(&serde_json::json!(88)));
    assert_eq!(created.status(), "ATIVA");
}

#[tokio::test]
async fn update_record_puts_to_entity_path() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/circuitos/41"))
        .and(body_json(serde_json::json!({ "status": "CANCELADO" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "id": 41, "designacao": "SPO-IP-1", "status": "CANCELADO" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let updated = client
        .update_record(
            Entity::Circuits,
            41,
            &record(serde_json::json!({ "status": "CANCELADO" })),
        )
        .await
        .expect("should update");
    assert_eq!(updated.status(), "CANCELADO");
}

#[tokio::test]
async fn delete_record_returns_message() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/inventario/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Item de inventário excluído com sucesso"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let message = client
        .delete_record(Entity::Inventory, 5)
        .await
        .expect("should delete");
    assert_eq!(
        message.as_deref(),
        Some("Item de inventário excluído com sucesso")
    );
}

#[tokio::test]
async fn tables_lists_names() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tables"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": ["lojas_lojas", "inventario_planilha1", "templates"]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tables = client.tables().await.expect("should list tables");
    assert_eq!(tables, vec!["lojas_lojas", "inventario_planilha1", "templates"]);
}

#[tokio::test]
async fn table_rows_send_window_search_and_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/table/lojas_lojas"))
        .and(query_param("limit", "25"))
        .and(query_param("offset", "50"))
        .and(query_param("search", "barra"))
        .and(query_param("orderBy", "CIDADE"))
        .and(query_param("orderDir", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "columns": ["id", "LOJAS", "CIDADE"],
                "rows": [{ "id": 3, "LOJAS": "VD BARRA", "CIDADE": "RIO DE JANEIRO" }],
                "total": 51
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let query = TableQuery {
        search: Some("barra".into()),
        order_by: Some("CIDADE".into()),
        descending: true,
        limit: 25,
        offset: 50,
    };
    let data = client
        .table_rows("lojas_lojas", &query)
        .await
        .expect("should fetch rows");
    assert_eq!(data.columns, vec!["id", "LOJAS", "CIDADE"]);
    assert_eq!(data.rows.len(), 1);
    assert_eq!(data.rows[0].name(), "VD BARRA");
    assert_eq!(data.total, 51);
}

#[tokio::test]
async fn table_rows_without_order_omit_direction() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/table/templates"))
        .and(query_param_is_missing("orderBy"))
        .and(query_param_is_missing("orderDir"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "columns": [], "rows": [], "total": 0 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let data = client
        .table_rows("templates", &TableQuery::default())
        .await
        .expect("should fetch rows");
    assert_eq!(data.total, 0);
}

#[tokio::test]
async fn raw_row_writes_report_ids_and_counts() {
    let server = MockServer::start().await;
    let fields = serde_json::json!({ "UF": "MG" });

    Mock::given(method("POST"))
        .and(path("/api/table/lojas_lojas"))
        .and(body_json(&fields))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "id": 321 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/table/lojas_lojas/321"))
        .and(body_json(&fields))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "updated": 1 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/table/lojas_lojas/321"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "deleted": 1 }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fields = record(fields);
    let id = client
        .insert_row("lojas_lojas", &fields)
        .await
        .expect("should insert");
    assert_eq!(id, 321);
    let updated = client
        .update_row("lojas_lojas", id, &fields)
        .await
        .expect("should update");
    assert_eq!(updated, 1);
    let deleted = client
        .delete_row("lojas_lojas", id)
        .await
        .expect("should delete");
    assert_eq!(deleted, 1);
}

#[tokio::test]
async fn export_table_returns_bytes_and_filename() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/export/circuitos"))
        .and(query_param("format", "csv"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "content-disposition",
                    "attachment; filename=\"circuitos_20240502_143000.csv\"",
                )
                .set_body_string("id,designacao\n41,SPO-IP-1\n"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let export = client
        .export_table(Entity::Circuits, ExportFormat::Csv)
        .await
        .expect("should download");
    assert_eq!(
        export.filename.as_deref(),
        Some("circuitos_20240502_143000.csv")
    );
    assert_eq!(export.content, b"id,designacao\n41,SPO-IP-1\n");
}

#[tokio::test]
async fn export_search_results_posts_rows() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/export/search-results"))
        .and(body_json(serde_json::json!({
            "results": [{ "LOJAS": "VD CENTRO" }],
            "searchType": "unificada",
            "filters": { "q": "centro" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("Tipo_Busca\nunificada\n"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut filters = serde_json::Map::new();
    filters.insert("q".to_owned(), serde_json::json!("centro"));
    let export = SearchExport {
        results: vec![record(serde_json::json!({ "LOJAS": "VD CENTRO" }))],
        search_type: "unificada".to_owned(),
        filters,
    };
    let file = client
        .export_search_results(&export)
        .await
        .expect("should download");
    assert!(file.filename.is_none());
    assert!(file.content.starts_with(b"Tipo_Busca"));
}

#[tokio::test]
async fn export_error_surfaces_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/export/lojas"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({ "detail": "disk full" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .export_table(Entity::Stores, ExportFormat::Excel)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::UnexpectedStatus { status: 500, detail: Some(ref d), .. } if d == "disk full"
    ));
}
