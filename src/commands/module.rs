//! Command modules and the registered type universe.
//!
//! Host code registers its module types in a [`TypeUniverse`]. Each entry
//! records the type's name, visibility, declared supertype and constructor;
//! discovery scans the universe and the builder instantiates what qualifies.
//!
//! A module exposes its methods through [`CommandModule::methods`]. Every
//! method is a [`MethodSpec`]: a [`MethodSignature`] plus the handler body.

use super::binder::{self, Invocable};
use super::metadata::{CommandMarker, MethodSignature, ParamSpec};
use super::types::Args;
use crate::error::{BuildError, DiscoveryError, HandlerFault};
use futures_util::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// What a handler body returns: a JSON result, nothing, or a host fault.
pub type HandlerOutput = Result<Option<serde_json::Value>, HandlerFault>;

/// Handler body of a module method, receiving the owning instance.
pub type MethodHandler<M> = Arc<dyn Fn(Arc<M>, Args) -> BoxFuture<'static, HandlerOutput> + Send + Sync>;

/// A host type grouping related command handlers.
pub trait CommandModule: Send + Sync + 'static {
    /// Every method the module exposes. Methods without a command marker are
    /// ignored by the builder.
    fn methods() -> Vec<MethodSpec<Self>>
    where
        Self: Sized;
}

/// One method of a module: declared metadata plus its body.
pub struct MethodSpec<M> {
    signature: MethodSignature,
    handler: Option<MethodHandler<M>>,
}

impl<M: Send + Sync + 'static> MethodSpec<M> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            signature: MethodSignature::new(name),
            handler: None,
        }
    }

    /// Attach a command marker.
    #[must_use]
    pub fn command(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.signature.markers.push(CommandMarker::new(name, description));
        self
    }

    /// Declare the next positional parameter.
    #[must_use]
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.signature.params.push(param);
        self
    }

    /// Attach the method body.
    #[must_use]
    pub fn handler<F, Fut>(mut self, body: F) -> Self
    where
        F: Fn(Arc<M>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerOutput> + Send + 'static,
    {
        self.handler = Some(Arc::new(move |module, args| Box::pin(body(module, args))));
        self
    }

    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    pub(crate) fn body(&self) -> Option<&MethodHandler<M>> {
        self.handler.as_ref()
    }
}

impl<M> fmt::Debug for MethodSpec<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodSpec")
            .field("signature", &self.signature)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

// ============================================================================
// Type universe
// ============================================================================

/// Capability a type may carry through its declared supertype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capability(pub &'static str);

impl Capability {
    /// Marks a type as a command module.
    pub const COMMAND_MODULE: Capability = Capability("command-module");
}

/// Declared visibility of a type at one nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Crate,
    Private,
}

/// The supertype a registered type extends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperType {
    pub name: String,
    pub capabilities: Vec<Capability>,
}

impl SuperType {
    /// The base every command module extends.
    pub fn command_module_base() -> Self {
        Self {
            name: "slashsync::CommandModuleBase".to_string(),
            capabilities: vec![Capability::COMMAND_MODULE],
        }
    }
}

/// Creates a fresh, type-erased module instance.
pub type ModuleFactory = Arc<dyn Fn() -> Box<dyn ModuleObject> + Send + Sync>;

/// How a registered type is constructed.
#[derive(Clone)]
pub enum Constructor {
    /// No-argument constructor.
    Nullary(ModuleFactory),
    /// Constructor requiring this many arguments.
    WithArgs(usize),
    /// No public constructor at all.
    None,
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nullary(_) => f.write_str("Nullary"),
            Self::WithArgs(n) => write!(f, "WithArgs({n})"),
            Self::None => f.write_str("None"),
        }
    }
}

/// One type known to the host.
#[derive(Debug, Clone)]
pub struct TypeEntry {
    pub name: String,
    pub visibility: Visibility,
    /// Visibility of each enclosing scope, outermost first.
    pub enclosing: Vec<Visibility>,
    pub supertype: Option<SuperType>,
    pub constructor: Constructor,
}

impl TypeEntry {
    /// A public type with no supertype and no constructor.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            enclosing: Vec::new(),
            supertype: None,
            constructor: Constructor::None,
        }
    }

    /// A public command module constructed with `M::default()`.
    pub fn module<M: CommandModule + Default>(name: impl Into<String>) -> Self {
        let factory: ModuleFactory =
            Arc::new(|| -> Box<dyn ModuleObject> { Box::new(ModuleHandle::new(M::default())) });
        Self::new(name)
            .extends(SuperType::command_module_base())
            .constructor(Constructor::Nullary(factory))
    }

    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn nested_in(mut self, visibility: Visibility) -> Self {
        self.enclosing.push(visibility);
        self
    }

    #[must_use]
    pub fn extends(mut self, supertype: SuperType) -> Self {
        self.supertype = Some(supertype);
        self
    }

    #[must_use]
    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = constructor;
        self
    }

    /// Whether the declared supertype carries `capability`.
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.supertype
            .as_ref()
            .is_some_and(|s| s.capabilities.contains(&capability))
    }

    /// Public at its own level and at every enclosing level.
    pub fn is_externally_visible(&self) -> bool {
        self.visibility == Visibility::Public
            && self.enclosing.iter().all(|v| *v == Visibility::Public)
    }
}

/// A source of registered types that discovery can scan.
pub trait TypeSource {
    /// All known types. Fails only when the source cannot be enumerated.
    fn types(&self) -> Result<&[TypeEntry], DiscoveryError>;

    /// Look up one type by name. The earliest registration wins.
    fn find(&self, name: &str) -> Option<&TypeEntry> {
        self.types().ok()?.iter().find(|t| t.name == name)
    }
}

/// Explicit registry of the host's types.
#[derive(Debug, Default, Clone)]
pub struct TypeUniverse {
    entries: Vec<TypeEntry>,
}

impl TypeUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: TypeEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    /// Register a public command module with a default constructor.
    pub fn register_module<M: CommandModule + Default>(&mut self, name: impl Into<String>) -> &mut Self {
        self.register(TypeEntry::module::<M>(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TypeSource for TypeUniverse {
    fn types(&self) -> Result<&[TypeEntry], DiscoveryError> {
        Ok(&self.entries)
    }
}

// ============================================================================
// Instances
// ============================================================================

/// Object-safe view of an instantiated module.
pub trait ModuleObject: Send + Sync {
    /// Signatures of every method, in declaration order.
    fn signatures(&self) -> Vec<&MethodSignature>;

    /// Bind method `index` to this instance.
    fn bind(&self, index: usize) -> Result<Invocable, BuildError>;
}

/// A module instance together with its method table.
pub struct ModuleHandle<M> {
    instance: Arc<M>,
    methods: Vec<MethodSpec<M>>,
}

impl<M: CommandModule> ModuleHandle<M> {
    pub fn new(module: M) -> Self {
        Self {
            instance: Arc::new(module),
            methods: M::methods(),
        }
    }
}

impl<M: CommandModule> ModuleObject for ModuleHandle<M> {
    fn signatures(&self) -> Vec<&MethodSignature> {
        self.methods.iter().map(MethodSpec::signature).collect()
    }

    fn bind(&self, index: usize) -> Result<Invocable, BuildError> {
        match self.methods.get(index) {
            Some(method) => binder::bind(method, &self.instance),
            None => Err(BuildError::Binding {
                method: format!("#{index}"),
                reason: "method index out of range",
            }),
        }
    }
}

/// Identity of a discovered module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub name: String,
    pub visible: bool,
}

/// A live module, owning its single instance for the registration pass.
pub struct ModuleInfo {
    descriptor: ModuleDescriptor,
    object: Box<dyn ModuleObject>,
}

impl ModuleInfo {
    /// Construct the module described by `entry`.
    ///
    /// Only nullary constructors are supported; anything else is fatal for
    /// this module.
    pub fn instantiate(descriptor: ModuleDescriptor, entry: &TypeEntry) -> Result<Self, BuildError> {
        match &entry.constructor {
            Constructor::Nullary(factory) => Ok(Self {
                descriptor,
                object: factory(),
            }),
            Constructor::WithArgs(_) | Constructor::None => Err(BuildError::NoNullaryConstructor {
                module: entry.name.clone(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    pub fn object(&self) -> &dyn ModuleObject {
        self.object.as_ref()
    }
}

impl fmt::Debug for ModuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleInfo")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}
