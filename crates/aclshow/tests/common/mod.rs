//! Test fixtures for ACL show scenarios
//!
//! Mock database contents for single-ASIC, multi-ASIC and APPL_DB
//! (dataplane) switches.

#![allow(dead_code)]

use std::sync::Arc;

use sonic_aclshow::{
    AclFetcher, AclShow, AclStateStore, DbId, MemoryStore, StatusMode, Topology,
};

/// Adds the DATAACL_5 control-plane table and its single rule.
pub fn with_dataacl_5(store: MemoryStore, ports: &str, status: Option<&str>) -> MemoryStore {
    let mut store = store
        .with_entry(
            DbId::ConfigDb,
            "ACL_TABLE",
            "DATAACL_5",
            [
                ("policy_desc", "DATAACL_5"),
                ("ports@", ports),
                ("stage", "ingress"),
                ("type", "L3"),
            ],
        )
        .with_entry(
            DbId::ConfigDb,
            "ACL_RULE",
            "DATAACL_5|RULE_1",
            [
                ("IP_PROTOCOL", "126"),
                ("PACKET_ACTION", "FORWARD"),
                ("PRIORITY", "9999"),
            ],
        );
    if let Some(status) = status {
        store.set(DbId::StateDb, "ACL_TABLE_TABLE", "DATAACL_5", [("status", status)]);
        store.set(DbId::StateDb, "ACL_RULE_TABLE", "DATAACL_5|RULE_1", [("status", status)]);
    }
    store
}

/// Adds the ENI dataplane table and its two redirect rules. Only the
/// outbound rule has a status entry.
pub fn with_eni(store: MemoryStore) -> MemoryStore {
    store
        .with_entry(
            DbId::ApplDb,
            "ACL_TABLE_TABLE",
            "ENI",
            [
                ("policy_desc", "Contains Mock Rules for ENI Based Forwarding"),
                ("ports", "PortChannel108,Ethernet104"),
                ("stage", "INGRESS"),
                ("type", "ENI_REDIRECT"),
            ],
        )
        .with_entry(
            DbId::ApplDb,
            "ACL_RULE_TABLE",
            "ENI:Vnet100_F4939FEFC47E_IN",
            [
                ("PRIORITY", "9996"),
                ("PACKET_ACTION", "REDIRECT"),
                ("REDIRECT_ACTION", "10.0.0.75"),
                ("INNER_DST_MAC", "f4:93:9f:ef:c4:7e"),
                ("DST_IP", "10.2.0.1/32"),
            ],
        )
        .with_entry(
            DbId::ApplDb,
            "ACL_RULE_TABLE",
            "ENI:Vnet100_F4939FEFC47E_OUT",
            [
                ("PRIORITY", "9997"),
                ("PACKET_ACTION", "REDIRECT"),
                ("REDIRECT_ACTION", "10.0.0.75"),
                ("TUNNEL_VNI", "4321"),
                ("INNER_SRC_MAC", "f4:93:9f:ef:c4:7e"),
                ("DST_IP", "10.2.0.1/32"),
            ],
        )
        .with_entry(DbId::StateDb, "ACL_TABLE_TABLE", "ENI", [("status", "Active")])
        .with_entry(
            DbId::StateDb,
            "ACL_RULE_TABLE",
            "ENI|Vnet100_F4939FEFC47E_OUT",
            [("status", "Active")],
        )
}

/// Builds a show engine over `stores`.
pub fn show_over(topology: Topology, stores: Vec<MemoryStore>, mode: StatusMode) -> AclShow {
    let stores = stores
        .into_iter()
        .map(|s| Arc::new(s) as Arc<dyn AclStateStore>)
        .collect();
    let fetcher = AclFetcher::new(topology, stores).expect("every instance has a store");
    AclShow::new(fetcher, mode)
}

/// Single-ASIC switch with DATAACL_5 bound to Ethernet124.
pub fn single_asic() -> AclShow {
    let store = with_dataacl_5(MemoryStore::new(""), "Ethernet124", Some("Active"));
    show_over(Topology::single(), vec![store], StatusMode::Auto)
}

/// Multi-ASIC switch (asic0, asic2) with DATAACL_5 active on both.
pub fn multi_asic(mode: StatusMode) -> AclShow {
    let stores = ["asic0", "asic2"]
        .into_iter()
        .map(|asic| {
            with_dataacl_5(
                MemoryStore::new(asic),
                "Ethernet124,Ethernet20",
                Some("Active"),
            )
        })
        .collect();
    show_over(Topology::multi(["asic0", "asic2"]), stores, mode)
}

/// Single-ASIC switch carrying both the control-plane DATAACL_5 table
/// and the dataplane ENI table.
pub fn with_appl_db() -> AclShow {
    let store = with_eni(with_dataacl_5(
        MemoryStore::new(""),
        "Ethernet124",
        Some("Active"),
    ));
    show_over(Topology::single(), vec![store], StatusMode::Auto)
}

/// Returns line `n` (0-based) of rendered output.
pub fn line(output: &str, n: usize) -> &str {
    output.lines().nth(n).unwrap_or_default()
}
