use crate::TestContext;

pub mod factory;
pub mod mockito;

impl TestContext {
    pub fn esi(&mut self) -> EsiFixtures<'_> {
        EsiFixtures { context: self }
    }
}

pub struct EsiFixtures<'a> {
    context: &'a mut TestContext,
}
