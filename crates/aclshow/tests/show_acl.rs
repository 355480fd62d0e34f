//! End-to-end tests for `show table` and `show rule`
//!
//! Each test builds mock per-instance databases, runs the show engine and
//! compares the rendered text.

mod common;

use pretty_assertions::assert_eq;
use std::fs;

use common::{line, multi_asic, show_over, single_asic, with_appl_db, with_dataacl_5, with_eni};
use sonic_aclshow::{
    AclEntityKind, AclShow, AclShowConfig, AclShowError, DbId, MemoryStore, StatusMode, Topology,
};

#[tokio::test]
async fn test_single_asic_show_table() {
    let output = single_asic().show_table(Some("DATAACL_5")).await.unwrap();
    let expected = "\
Name       Type    Binding      Description    Stage    Status
---------  ------  -----------  -------------  -------  --------
DATAACL_5  L3      Ethernet124  DATAACL_5      ingress  Active
";
    assert_eq!(output, expected);
}

#[tokio::test]
async fn test_single_asic_two_bindings_expand() {
    let store = with_dataacl_5(MemoryStore::new(""), "Ethernet124,Ethernet20", Some("Active"));
    let show = show_over(Topology::single(), vec![store], StatusMode::Auto);
    let output = show.show_table(Some("DATAACL_5")).await.unwrap();
    let expected = "\
Name       Type    Binding      Description    Stage    Status
---------  ------  -----------  -------------  -------  --------
DATAACL_5  L3      Ethernet20   DATAACL_5      ingress  Active
                   Ethernet124
";
    assert_eq!(output, expected);
}

#[tokio::test]
async fn test_single_asic_show_rule() {
    let output = single_asic().show_rule(Some("DATAACL_5"), None).await.unwrap();
    let expected = "\
Table      Rule      Priority    Action    Match             Status
---------  ------  ----------  --------  ----------------  --------
DATAACL_5  RULE_1        9999  FORWARD   IP_PROTOCOL: 126  Active
";
    assert_eq!(output, expected);
}

#[tokio::test]
async fn test_single_asic_show_rule_by_name() {
    let output = single_asic()
        .show_rule(Some("DATAACL_5"), Some("RULE_1"))
        .await
        .unwrap();
    assert_eq!(
        line(&output, 2),
        "DATAACL_5  RULE_1        9999  FORWARD   IP_PROTOCOL: 126  Active"
    );
    assert_eq!(output.lines().count(), 3);
}

#[tokio::test]
async fn test_multi_asic_show_table() {
    let output = multi_asic(StatusMode::Auto)
        .show_table(Some("DATAACL_5"))
        .await
        .unwrap();
    let expected = "\
Name       Type    Binding      Description    Stage    Status
---------  ------  -----------  -------------  -------  --------------------------------------
DATAACL_5  L3      Ethernet20   DATAACL_5      ingress  {'asic0': 'Active', 'asic2': 'Active'}
                   Ethernet124
";
    assert_eq!(output, expected);
}

#[tokio::test]
async fn test_multi_asic_bindings_from_every_instance() {
    let stores = vec![
        with_dataacl_5(MemoryStore::new("asic0"), "Ethernet20", Some("Active")),
        with_dataacl_5(MemoryStore::new("asic2"), "Ethernet124", Some("Active")),
    ];
    let show = show_over(Topology::multi(["asic0", "asic2"]), stores, StatusMode::Auto);
    let output = show.show_table(Some("DATAACL_5")).await.unwrap();
    let expected = "\
Name       Type    Binding      Description    Stage    Status
---------  ------  -----------  -------------  -------  --------------------------------------
DATAACL_5  L3      Ethernet20   DATAACL_5      ingress  {'asic0': 'Active', 'asic2': 'Active'}
                   Ethernet124
";
    assert_eq!(output, expected);
}

#[tokio::test]
async fn test_multi_asic_show_rule() {
    let output = multi_asic(StatusMode::Auto)
        .show_rule(Some("DATAACL_5"), None)
        .await
        .unwrap();
    assert_eq!(
        line(&output, 2),
        "DATAACL_5  RULE_1        9999  FORWARD   IP_PROTOCOL: 126  {'asic0': 'Active', 'asic2': 'Active'}"
    );
}

#[tokio::test]
async fn test_multi_asic_collapse_mode() {
    let output = multi_asic(StatusMode::Collapse)
        .show_table(Some("DATAACL_5"))
        .await
        .unwrap();
    assert_eq!(
        line(&output, 2),
        "DATAACL_5  L3      Ethernet20   DATAACL_5      ingress  Active"
    );
}

#[tokio::test]
async fn test_multi_asic_collapse_mode_keeps_disagreement() {
    let stores = vec![
        with_dataacl_5(MemoryStore::new("asic0"), "Ethernet20", Some("Active")),
        with_dataacl_5(MemoryStore::new("asic2"), "Ethernet20", Some("Inactive")),
    ];
    let show = show_over(
        Topology::multi(["asic0", "asic2"]),
        stores,
        StatusMode::Collapse,
    );
    let output = show.show_table(Some("DATAACL_5")).await.unwrap();
    assert!(line(&output, 2).ends_with("{'asic0': 'Active', 'asic2': 'Inactive'}"));
}

#[tokio::test]
async fn test_multi_asic_missing_status_is_na() {
    let stores = vec![
        with_dataacl_5(MemoryStore::new("asic0"), "Ethernet20", Some("Active")),
        with_dataacl_5(MemoryStore::new("asic2"), "Ethernet20", None),
    ];
    let show = show_over(Topology::multi(["asic2", "asic0"]), stores, StatusMode::Auto);
    let output = show.show_rule(None, None).await.unwrap();
    assert!(line(&output, 2).ends_with("{'asic0': 'Active', 'asic2': 'N/A'}"));
}

#[tokio::test]
async fn test_appl_db_show_table() {
    let output = with_appl_db().show_table(Some("ENI")).await.unwrap();
    let expected = "\
Name    Type          Binding         Description                                   Stage    Status
------  ------------  --------------  --------------------------------------------  -------  --------
ENI     ENI_REDIRECT  Ethernet104     Contains Mock Rules for ENI Based Forwarding  ingress  Active
                      PortChannel108
";
    assert_eq!(output, expected);
}

#[tokio::test]
async fn test_appl_db_show_rule() {
    let output = with_appl_db().show_rule(Some("ENI"), None).await.unwrap();
    let expected = "\
Table    Rule                      Priority    Action               Match                             Status
-------  ------------------------  ----------  -------------------  --------------------------------  --------
ENI      Vnet100_F4939FEFC47E_OUT  9997        REDIRECT: 10.0.0.75  DST_IP: 10.2.0.1/32               Active
                                                                    INNER_SRC_MAC: f4:93:9f:ef:c4:7e
                                                                    TUNNEL_VNI: 4321
ENI      Vnet100_F4939FEFC47E_IN   9996        REDIRECT: 10.0.0.75  DST_IP: 10.2.0.1/32               N/A
                                                                    INNER_DST_MAC: f4:93:9f:ef:c4:7e
";
    assert_eq!(output, expected);
}

#[tokio::test]
async fn test_appl_db_show_single_rule() {
    let output = with_appl_db()
        .show_rule(Some("ENI"), Some("Vnet100_F4939FEFC47E_IN"))
        .await
        .unwrap();
    assert_eq!(output.lines().count(), 4);
    assert!(line(&output, 2).contains("Vnet100_F4939FEFC47E_IN"));
    assert!(line(&output, 2).ends_with("N/A"));
}

#[tokio::test]
async fn test_list_all_tables_control_plane_first() {
    let output = with_appl_db().show_table(None).await.unwrap();
    assert!(line(&output, 2).starts_with("DATAACL_5 "));
    assert!(line(&output, 3).starts_with("ENI "));
    assert!(line(&output, 4).contains("PortChannel108"));
    assert_eq!(output.lines().count(), 5);
}

#[tokio::test]
async fn test_list_all_rules() {
    let output = with_appl_db().show_rule(None, None).await.unwrap();
    let rules: Vec<&str> = output
        .lines()
        .skip(2)
        .filter(|l| !l.starts_with(' '))
        .collect();
    assert_eq!(rules.len(), 3);
    assert!(rules[0].starts_with("DATAACL_5"));
    assert!(rules[1].contains("Vnet100_F4939FEFC47E_OUT"));
    assert!(rules[2].contains("Vnet100_F4939FEFC47E_IN"));
}

#[tokio::test]
async fn test_no_acls_renders_headers_only() {
    let show = show_over(
        Topology::single(),
        vec![MemoryStore::new("")],
        StatusMode::Auto,
    );
    let output = show.show_table(None).await.unwrap();
    let expected = "\
Name    Type    Binding    Description    Stage    Status
------  ------  ---------  -------------  -------  --------
";
    assert_eq!(output, expected);
}

#[tokio::test]
async fn test_table_without_rules_renders_empty() {
    let store = with_dataacl_5(MemoryStore::new(""), "Ethernet124", Some("Active")).with_entry(
        DbId::ConfigDb,
        "ACL_TABLE",
        "EVERFLOW",
        [("type", "MIRROR"), ("ports", "Ethernet0")],
    );
    let show = show_over(Topology::single(), vec![store], StatusMode::Auto);
    let output = show.show_rule(Some("EVERFLOW"), None).await.unwrap();
    assert_eq!(output.lines().count(), 2);
    assert!(output.starts_with("Table "));
}

#[tokio::test]
async fn test_dataplane_name_takes_precedence() {
    let store = with_eni(with_dataacl_5(MemoryStore::new(""), "Ethernet124", None)).with_entry(
        DbId::ApplDb,
        "ACL_TABLE_TABLE",
        "DATAACL_5",
        [("type", "L3"), ("policy_desc", "dataplane copy")],
    );
    let show = show_over(Topology::single(), vec![store], StatusMode::Auto);
    let output = show.show_table(Some("DATAACL_5")).await.unwrap();
    assert!(line(&output, 2).contains("dataplane copy"));
    assert!(line(&output, 2).ends_with("N/A"));
    assert_eq!(output.lines().count(), 3);
}

#[tokio::test]
async fn test_ctrlplane_table_binds_services() {
    let store = MemoryStore::new("").with_entry(
        DbId::ConfigDb,
        "ACL_TABLE",
        "SSH_ONLY",
        [
            ("type", "CTRLPLANE"),
            ("policy_desc", "SSH_ONLY"),
            ("services@", "SSH"),
            ("stage", "ingress"),
        ],
    );
    let show = show_over(Topology::single(), vec![store], StatusMode::Auto);
    let output = show.show_table(Some("SSH_ONLY")).await.unwrap();
    assert!(line(&output, 2).contains("CTRLPLANE"));
    assert!(line(&output, 2).contains("SSH"));
    assert!(line(&output, 2).ends_with("N/A"));
}

#[tokio::test]
async fn test_missing_table_is_not_found() {
    let err = single_asic().show_table(Some("NOPE")).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        err,
        AclShowError::EntityNotFound {
            kind: AclEntityKind::Table,
            ..
        }
    ));

    let err = single_asic().show_rule(Some("NOPE"), None).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_missing_rule_is_not_found() {
    let err = single_asic()
        .show_rule(Some("DATAACL_5"), Some("RULE_9"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AclShowError::EntityNotFound {
            kind: AclEntityKind::Rule,
            ref name,
        } if name == "DATAACL_5|RULE_9"
    ));
}

#[tokio::test]
async fn test_unreachable_instance_fails_whole_command() {
    let stores = vec![
        with_dataacl_5(MemoryStore::new("asic0"), "Ethernet20", Some("Active")),
        MemoryStore::unreachable("asic2", "database not ready"),
    ];
    let show = show_over(Topology::multi(["asic0", "asic2"]), stores, StatusMode::Auto);
    let err = show.show_table(None).await.unwrap_err();
    assert!(matches!(
        err,
        AclShowError::InstanceUnreachable { ref instance, .. } if instance == "asic2"
    ));
}

#[tokio::test]
async fn test_from_config_loads_dumps() {
    let dir = tempfile::tempdir().unwrap();
    let dump = r#"{
        "CONFIG_DB": {
            "ACL_TABLE|DATAACL_5": {
                "policy_desc": "DATAACL_5",
                "ports": ["Ethernet124", "Ethernet20"],
                "stage": "ingress",
                "type": "L3"
            },
            "ACL_RULE|DATAACL_5|RULE_1": {
                "IP_PROTOCOL": "126",
                "PACKET_ACTION": "FORWARD",
                "PRIORITY": "9999"
            }
        },
        "STATE_DB": {
            "ACL_TABLE_TABLE|DATAACL_5": { "status": "Active" },
            "ACL_RULE_TABLE|DATAACL_5|RULE_1": { "status": "Active" }
        }
    }"#;
    fs::write(dir.path().join("asic0.json"), dump).unwrap();
    fs::write(dir.path().join("asic2.json"), dump).unwrap();

    let config_path = dir.path().join("aclshow.toml");
    fs::write(
        &config_path,
        format!(
            "[topology]\ninstances = [\"asic0\", \"asic2\"]\n\n[database]\ndump_dir = \"{}\"\n",
            dir.path().display()
        ),
    )
    .unwrap();

    let config = AclShowConfig::load_or_default(&config_path).unwrap();
    config.validate().unwrap();
    let show = AclShow::from_config(&config).unwrap();

    let output = show.show_table(Some("DATAACL_5")).await.unwrap();
    assert_eq!(
        line(&output, 2),
        "DATAACL_5  L3      Ethernet20   DATAACL_5      ingress  {'asic0': 'Active', 'asic2': 'Active'}"
    );
    assert_eq!(line(&output, 3).trim(), "Ethernet124");
}

#[test]
fn test_from_config_missing_dump_is_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AclShowConfig::default();
    config.topology.instances = vec!["asic0".to_string(), "asic1".to_string()];
    config.database.dump_dir = dir.path().to_path_buf();
    fs::write(dir.path().join("asic0.json"), "{}").unwrap();

    let err = AclShow::from_config(&config).err().unwrap();
    assert!(matches!(
        err,
        AclShowError::InstanceUnreachable { ref instance, .. } if instance == "asic1"
    ));
}
