/// An exercise library entry. The catalog ships with the client (see
/// `crate::library`), so these are plain static-friendly types rather than
/// wire models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: u32,
    pub name: &'static str,
    pub muscle: &'static str,
    pub difficulty: &'static str,
    pub equipment: &'static str,
    pub instructions: &'static [&'static str],
}
