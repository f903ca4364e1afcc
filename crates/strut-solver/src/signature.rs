//! Declared signatures: what a signature file says about classes,
//! modules, interfaces and aliases before any synthesis happens.

use strut_types::{MethodType, Type, TypeName};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Instance,
    Singleton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// One declared method: a name, where it lives (instance or singleton
/// side), and one or more signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    pub kind: MethodKind,
    pub visibility: Visibility,
    pub overloads: Vec<MethodType>,
}

impl MethodDecl {
    pub fn instance(name: impl Into<String>, overloads: Vec<MethodType>) -> Self {
        MethodDecl {
            name: name.into(),
            kind: MethodKind::Instance,
            visibility: Visibility::Public,
            overloads,
        }
    }

    pub fn private_instance(name: impl Into<String>, overloads: Vec<MethodType>) -> Self {
        MethodDecl {
            name: name.into(),
            kind: MethodKind::Instance,
            visibility: Visibility::Private,
            overloads,
        }
    }

    pub fn singleton(name: impl Into<String>, overloads: Vec<MethodType>) -> Self {
        MethodDecl {
            name: name.into(),
            kind: MethodKind::Singleton,
            visibility: Visibility::Public,
            overloads,
        }
    }
}

/// A reference to another declaration with type arguments, as used in
/// superclass and include clauses. The arguments may mention the
/// referring declaration's own type parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominalRef {
    pub name: TypeName,
    pub args: Vec<Type>,
}

impl NominalRef {
    pub fn new(name: TypeName, args: Vec<Type>) -> Self {
        NominalRef { name, args }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSignature {
    pub name: TypeName,
    pub type_params: Vec<String>,
    pub superclass: Option<NominalRef>,
    pub includes: Vec<NominalRef>,
    pub methods: Vec<MethodDecl>,
}

impl ClassSignature {
    pub fn new(name: TypeName) -> Self {
        ClassSignature {
            name,
            type_params: Vec::new(),
            superclass: None,
            includes: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_type_params(mut self, type_params: Vec<String>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn with_superclass(mut self, superclass: NominalRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn with_include(mut self, include: NominalRef) -> Self {
        self.includes.push(include);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSignature {
    pub name: TypeName,
    pub type_params: Vec<String>,
    pub includes: Vec<NominalRef>,
    pub methods: Vec<MethodDecl>,
}

impl ModuleSignature {
    pub fn new(name: TypeName) -> Self {
        ModuleSignature {
            name,
            type_params: Vec::new(),
            includes: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_type_params(mut self, type_params: Vec<String>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn with_include(mut self, include: NominalRef) -> Self {
        self.includes.push(include);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }
}

/// A structural interface declaration. All methods are public
/// instance methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSignature {
    pub name: TypeName,
    pub type_params: Vec<String>,
    pub includes: Vec<NominalRef>,
    pub methods: Vec<MethodDecl>,
}

impl InterfaceSignature {
    pub fn new(name: TypeName) -> Self {
        InterfaceSignature {
            name,
            type_params: Vec::new(),
            includes: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_type_params(mut self, type_params: Vec<String>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn with_include(mut self, include: NominalRef) -> Self {
        self.includes.push(include);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSignature {
    pub name: TypeName,
    pub type_params: Vec<String>,
    pub body: Type,
}

impl AliasSignature {
    pub fn new(name: TypeName, body: Type) -> Self {
        AliasSignature {
            name,
            type_params: Vec::new(),
            body,
        }
    }

    pub fn with_type_params(mut self, type_params: Vec<String>) -> Self {
        self.type_params = type_params;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    Class(ClassSignature),
    Module(ModuleSignature),
    Interface(InterfaceSignature),
    Alias(AliasSignature),
}

impl Signature {
    pub fn name(&self) -> &TypeName {
        match self {
            Signature::Class(sig) => &sig.name,
            Signature::Module(sig) => &sig.name,
            Signature::Interface(sig) => &sig.name,
            Signature::Alias(sig) => &sig.name,
        }
    }
}
