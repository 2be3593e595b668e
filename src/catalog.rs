use crate::types::{Service, Stylist};

/// Read-only reference data: the services on offer and the stylists who
/// can be booked. Lookups never touch the store.
#[derive(Debug, Clone)]
pub struct Catalog {
    services: Vec<Service>,
    stylists: Vec<Stylist>,
}

impl Default for Catalog {
    fn default() -> Self {
        let services = vec![
            service(1, "Haircut", 25),
            service(2, "Hair Styling", 40),
            service(3, "Hair Coloring", 80),
            service(4, "Beard Trim", 15),
        ];
        let stylists = vec![
            stylist(1, "Alex", Some("Color")),
            stylist(2, "Jordan", None),
            stylist(3, "Sam", None),
        ];
        Self::new(services, stylists)
    }
}

impl Catalog {
    pub fn new(services: Vec<Service>, stylists: Vec<Stylist>) -> Self {
        Self { services, stylists }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn stylists(&self) -> &[Stylist] {
        &self.stylists
    }

    pub fn service(&self, id: i32) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }

    pub fn stylist(&self, id: i32) -> Option<&Stylist> {
        self.stylists.iter().find(|stylist| stylist.id == id)
    }

    /// `None` for unknown ids and for stylists who are not active.
    pub fn active_stylist(&self, id: i32) -> Option<&Stylist> {
        self.stylist(id).filter(|stylist| stylist.active)
    }
}

fn service(id: i32, name: &str, price: u32) -> Service {
    Service {
        id,
        name: name.into(),
        price,
    }
}

fn stylist(id: i32, name: &str, specialty: Option<&str>) -> Stylist {
    Stylist {
        id,
        name: name.into(),
        active: true,
        specialty: specialty.map(Into::into),
        bio: None,
    }
}
